// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use std::env;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use the_switchboard::compiler::compile;
use the_switchboard::config::{
    detect_modality, load_engine_config, load_workflow, validate_workflow, ChatRequest,
    EngineConfig, Graph, RuntimeBuilder,
};

const USAGE: &str = "\
Usage: switchboard <command> <workflow.(json|yaml)> [args] [--config engine.toml]

Commands:
  run <workflow> <message>   execute the workflow against one message
  validate <workflow>        report structural issues
  plan <workflow>            print the compiled plan as JSON
  modality <workflow>        print input/output modality and features

Example: switchboard run configs/rag-assistant.json \"how long do refunds take?\"";

/// Split `--config <path>` out of the positional arguments
fn parse_args(args: &[String]) -> Result<(Vec<String>, Option<String>)> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter.next().context("--config needs a path")?;
            config = Some(path.clone());
        } else {
            positional.push(arg.clone());
        }
    }
    Ok((positional, config))
}

fn init_logging(cfg: &EngineConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_graph(path: &str) -> Result<Graph> {
    let workflow = load_workflow(path).with_context(|| format!("loading {}", path))?;
    Ok(Graph::from_config(&workflow)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (positional, config_path) = parse_args(&args)?;

    let engine_config = match &config_path {
        Some(path) => load_engine_config(path).with_context(|| format!("loading {}", path))?,
        None => EngineConfig::default(),
    };
    init_logging(&engine_config);

    match positional.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["run", workflow, message] => run(workflow, message, &engine_config).await,
        ["validate", workflow] => {
            let report = validate_workflow(&load_graph(workflow)?);
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.valid {
                std::process::exit(2);
            }
            Ok(())
        }
        ["plan", workflow] => {
            let plan = compile(&load_graph(workflow)?)?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
            Ok(())
        }
        ["modality", workflow] => {
            let report = detect_modality(&load_graph(workflow)?);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        _ => {
            eprintln!("{}", USAGE);
            bail!("unrecognised arguments: {:?}", positional);
        }
    }
}

async fn run(workflow_path: &str, message: &str, cfg: &EngineConfig) -> Result<()> {
    let start_time = Instant::now();
    let workflow = load_workflow(workflow_path).with_context(|| format!("loading {}", workflow_path))?;

    println!("📋 Workflow: {}", workflow_path);
    println!("💬 Message: \"{}\"", message);

    let runtime = RuntimeBuilder::from_config(cfg);
    let response = runtime
        .respond(ChatRequest {
            message: message.to_string(),
            workflow,
            conversation_history: Vec::new(),
            session_id: None,
        })
        .await;

    println!("\n🔄 Nodes Executed: {}", response.nodes_executed.join(" → "));
    if let Some(model) = &response.model_used {
        println!("🤖 Model: {}", model);
    }
    println!("⏱️  Processing Time: {:.2} ms", response.processing_time_ms);
    println!("\n🎯 Response:\n{}", response.response);
    println!("\n⏱️  Total Time (including load): {:?}", start_time.elapsed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn config_flag_is_split_out() {
        let (positional, config) =
            parse_args(&strings(&["run", "--config", "engine.toml", "wf.yaml", "hi"])).unwrap();
        assert_eq!(positional, strings(&["run", "wf.yaml", "hi"]));
        assert_eq!(config.as_deref(), Some("engine.toml"));
    }

    #[test]
    fn dangling_config_flag_is_an_error() {
        assert!(parse_args(&strings(&["plan", "wf.yaml", "--config"])).is_err());
    }
}
