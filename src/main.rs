use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use caseway_config::ProcessDef;
use caseway_gateway::filters::{ActionConditionFilter, DataValuesFilter};
use caseway_navigator::{CaseData, GatewayFilter, GatewayFilterRegistry, ProcessNavigator};
use caseway_process::{Node, ProcessGraph};

/// Caseway - find where a case goes next in its process
#[derive(Parser, Debug)]
#[command(name = "caseway")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Log filter used when RUST_LOG is not set (e.g. "debug", "caseway_navigator=trace")
  #[arg(long, global = true, default_value = "warn")]
  log_level: String,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Summarize a process definition
  Inspect {
    /// Path to the process definition (JSON or YAML)
    definition: PathBuf,
  },

  /// Find the next task after a node
  Next {
    /// Path to the process definition (JSON or YAML)
    definition: PathBuf,

    /// The node the case currently occupies
    #[arg(long)]
    from: String,

    /// Case data as JSON; read from stdin when omitted and stdin is piped
    #[arg(long)]
    case: Option<PathBuf>,

    /// Action token supplied by the user
    #[arg(long)]
    action: Option<String>,

    /// Route a gateway on a case data value: GATEWAY=KEY
    #[arg(long = "data-filter", value_parser = parse_data_filter)]
    data_filters: Vec<(String, String)>,

    /// Route a gateway on flow condition labels matching the action
    #[arg(long = "action-filter")]
    action_filters: Vec<String>,

    /// Print the next node as JSON
    #[arg(long)]
    json: bool,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(&cli.log_level);

  match cli.command {
    Some(Commands::Inspect { definition }) => inspect(definition)?,
    Some(Commands::Next {
      definition,
      from,
      case,
      action,
      data_filters,
      action_filters,
      json,
    }) => {
      let registry = build_registry(data_filters, action_filters)?;
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(async {
        run_next(definition, from, case, action, registry, json).await
      })?;
    }
    None => {
      println!("caseway - use --help to see available commands");
    }
  }

  Ok(())
}

fn init_tracing(default_filter: &str) {
  let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .try_init();
}

fn load_graph(definition: &Path) -> Result<ProcessGraph> {
  let def = ProcessDef::from_path(definition)
    .with_context(|| format!("failed to load process definition: {}", definition.display()))?;
  ProcessGraph::from_def(def)
    .with_context(|| format!("invalid process definition: {}", definition.display()))
}

fn inspect(definition: PathBuf) -> Result<()> {
  let graph = load_graph(&definition)?;

  println!("process: {}", graph.process_id());
  if let Some(name) = graph.name() {
    println!("name: {}", name);
  }
  println!(
    "nodes: {}, flows: {}",
    graph.nodes().count(),
    graph.flows().count()
  );
  println!("start events: {}", graph.start_event_ids().join(", "));
  println!("tasks: {}", graph.task_ids().join(", "));
  println!("gateways: {}", graph.gateway_ids().join(", "));
  println!("end events: {}", graph.end_event_ids().join(", "));

  Ok(())
}

fn build_registry(
  data_filters: Vec<(String, String)>,
  action_filters: Vec<String>,
) -> Result<GatewayFilterRegistry> {
  let mut filters: Vec<Arc<dyn GatewayFilter>> = Vec::new();
  for (gateway_id, key) in data_filters {
    filters.push(Arc::new(DataValuesFilter::new(gateway_id, key)));
  }
  for gateway_id in action_filters {
    filters.push(Arc::new(ActionConditionFilter::new(gateway_id)));
  }

  GatewayFilterRegistry::new(filters).context("failed to register gateway filters")
}

async fn run_next(
  definition: PathBuf,
  from: String,
  case: Option<PathBuf>,
  action: Option<String>,
  registry: GatewayFilterRegistry,
  json: bool,
) -> Result<()> {
  let graph = load_graph(&definition)?;
  let case = match case {
    Some(path) => read_case_file(&path).await?,
    None => read_case_from_stdin()?,
  };

  let navigator = ProcessNavigator::new(Arc::new(graph), Arc::new(registry));

  // Ctrl-C aborts a navigation stuck in a filter
  let cancel = CancellationToken::new();
  let signal_cancel = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      warn!("interrupted, cancelling navigation");
      signal_cancel.cancel();
    }
  });

  let next = navigator
    .get_next_task(&case, &from, action.as_deref(), &cancel)
    .await
    .with_context(|| format!("navigation from '{}' failed", from))?;

  if json {
    println!("{}", serde_json::to_string_pretty(&next)?);
  } else {
    println!("{}", describe(next.as_ref()));
  }

  Ok(())
}

async fn read_case_file(path: &Path) -> Result<CaseData> {
  let content = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read case file: {}", path.display()))?;
  serde_json::from_str(&content)
    .with_context(|| format!("failed to parse case file: {}", path.display()))
}

fn read_case_from_stdin() -> Result<CaseData> {
  use std::io::IsTerminal;

  if io::stdin().is_terminal() {
    return Ok(CaseData::default());
  }

  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("failed to read case data from stdin")?;

  if input.trim().is_empty() {
    Ok(CaseData::default())
  } else {
    serde_json::from_str(&input).context("failed to parse case data JSON from stdin")
  }
}

fn describe(next: Option<&Node>) -> String {
  match next {
    Some(node) => match &node.name {
      Some(name) => format!("next: {} ({}, \"{}\")", node.id, node.kind.as_str(), name),
      None => format!("next: {} ({})", node.id, node.kind.as_str()),
    },
    None => "no next element".to_string(),
  }
}

/// Parse `GATEWAY=KEY`.
fn parse_data_filter(value: &str) -> Result<(String, String), String> {
  match value.split_once('=') {
    Some((gateway, key)) if !gateway.is_empty() && !key.is_empty() => {
      Ok((gateway.to_string(), key.to_string()))
    }
    _ => Err(format!("expected GATEWAY=KEY, got '{}'", value)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use caseway_process::{NodeKind, TaskExtension};

  #[test]
  fn test_parse_data_filter() {
    assert_eq!(
      parse_data_filter("Gateway1=choose1"),
      Ok(("Gateway1".to_string(), "choose1".to_string()))
    );
    assert!(parse_data_filter("Gateway1").is_err());
    assert!(parse_data_filter("=choose").is_err());
    assert!(parse_data_filter("Gateway1=").is_err());
  }

  #[test]
  fn test_next_command_parses() {
    let cli = Cli::try_parse_from([
      "caseway",
      "next",
      "process.json",
      "--from",
      "Task1",
      "--action",
      "sign",
      "--data-filter",
      "Gateway1=choose1",
      "--data-filter",
      "Gateway2=choose2",
      "--action-filter",
      "Gateway3",
      "--json",
    ])
    .unwrap();

    match cli.command {
      Some(Commands::Next {
        from,
        action,
        data_filters,
        action_filters,
        json,
        case,
        ..
      }) => {
        assert_eq!(from, "Task1");
        assert_eq!(action.as_deref(), Some("sign"));
        assert_eq!(data_filters.len(), 2);
        assert_eq!(data_filters[1].0, "Gateway2");
        assert_eq!(action_filters, vec!["Gateway3"]);
        assert!(json);
        assert!(case.is_none());
      }
      other => panic!("expected next command, got {:?}", other),
    }
  }

  #[test]
  fn test_next_requires_from() {
    assert!(Cli::try_parse_from(["caseway", "next", "process.json"]).is_err());
  }

  #[test]
  fn test_duplicate_filters_rejected() {
    let result = build_registry(
      vec![("Gateway1".to_string(), "choose".to_string())],
      vec!["Gateway1".to_string()],
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_describe() {
    let node = Node {
      id: "Task2".to_string(),
      name: Some("Bekreft skjemadata".to_string()),
      incoming: vec![],
      outgoing: vec![],
      kind: NodeKind::Task(TaskExtension::default()),
    };
    assert_eq!(
      describe(Some(&node)),
      "next: Task2 (task, \"Bekreft skjemadata\")"
    );
    assert_eq!(describe(None), "no next element");
  }

  #[tokio::test]
  async fn test_run_next_against_definition_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let definition = dir.path().join("process.yaml");
    std::fs::write(
      &definition,
      r#"
process_id: approval
nodes:
  - { id: Task1, type: task, task_type: data }
  - { id: Gateway1, type: gateway }
  - { id: Task2, type: task, task_type: confirm }
  - { id: EndEvent, type: end_event }
flows:
  - { id: Flow1, source: Task1, target: Gateway1 }
  - { id: Flow2, source: Gateway1, target: Task2, condition: confirm }
  - { id: Flow3, source: Gateway1, target: EndEvent, condition: reject }
"#,
    )
    .unwrap();
    let case_path = dir.path().join("case.json");
    std::fs::write(&case_path, r#"{ "instance_id": "50001/cc" }"#).unwrap();

    let registry = build_registry(vec![], vec!["Gateway1".to_string()]).unwrap();
    run_next(
      definition.clone(),
      "Task1".to_string(),
      Some(case_path.clone()),
      Some("reject".to_string()),
      registry,
      true,
    )
    .await
    .unwrap();

    let err = run_next(
      definition,
      "Task1".to_string(),
      Some(case_path),
      None,
      GatewayFilterRegistry::empty(),
      false,
    )
    .await
    .unwrap_err();
    assert!(format!("{:#}", err).contains("Multiple next elements found from Task1"));
  }
}
