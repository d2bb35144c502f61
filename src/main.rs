use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use logix::calculator::{DisplayState, Session, Symbol};
use logix::config::Config;
use logix::graph::{Graph, SettingsPatch};
use logix::history::{History, HistoryStore, JsonFileStore, MemoryStore};

#[derive(Parser)]
#[command(name = "logix", version, about = "Scientific calculator and function plotter")]
struct Cli {
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Do not read or write the saved history.
    #[arg(long, global = true)]
    no_history: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate expressions written in keypad notation, e.g. "2(3+4)" or "sqrt(16)".
    Eval {
        #[arg(required = true, allow_hyphen_values = true)]
        expressions: Vec<String>,
    },
    /// Press keypad symbols in order ("7", "+", "sin(", "π", "DEL", "C"); "=" evaluates.
    Keys {
        #[arg(required = true, allow_hyphen_values = true)]
        symbols: Vec<String>,
    },
    /// Sample functions of x and print the points.
    Plot {
        #[arg(required = true)]
        functions: Vec<String>,
        #[arg(long, allow_hyphen_values = true)]
        x_min: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        x_max: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        y_min: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        y_max: Option<f64>,
        #[arg(long)]
        step: Option<f64>,
    },
    /// Show the saved history.
    History {
        /// Remove all saved entries.
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let store: Box<dyn HistoryStore> = match JsonFileStore::default_location() {
        Some(store) if !cli.no_history => Box::new(store),
        _ => Box::new(MemoryStore::default()),
    };
    let history = History::load(store.as_ref(), config.history.limit());

    match cli.command {
        Command::Eval { expressions } => {
            let mut session = Session::new(history);
            for expression in &expressions {
                session.set_expression(expression);
                let state = session.submit_equals();
                print(cli.json, &state, || match &state.error {
                    Some(error) => format!("{expression}: {error}"),
                    None => state.expression.clone(),
                })?;
            }
            session.history().persist(store.as_ref());
        }
        Command::Keys { symbols } => {
            let mut session = Session::new(history);
            let mut state = session.display();
            for label in &symbols {
                state = if label == "=" {
                    session.submit_equals()
                } else {
                    let symbol: Symbol = label.parse()?;
                    session.submit_symbol(symbol)
                };
            }
            print(cli.json, &state, || render_state(&state))?;
            session.history().persist(store.as_ref());
        }
        Command::Plot {
            functions,
            x_min,
            x_max,
            y_min,
            y_max,
            step,
        } => {
            let mut graph = Graph::empty(config.graph_settings()?);
            graph.update_settings(&SettingsPatch {
                x_min,
                x_max,
                y_min,
                y_max,
                step,
                ..Default::default()
            })?;
            for function in &functions {
                graph.add_equation(function)?;
            }

            let datasets = graph.datasets();
            print(cli.json, &datasets, || {
                datasets
                    .iter()
                    .map(|ds| {
                        let points: Vec<String> = ds
                            .points
                            .iter()
                            .map(|p| format!("({}, {})", p.x, p.y))
                            .collect();
                        format!("{} [{}]\n{}", ds.label, ds.color, points.join(" "))
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Command::History { clear } => {
            let mut history = history;
            if clear {
                history.clear();
                history.persist(store.as_ref());
            }
            let entries = history.list();
            print(cli.json, &entries, || {
                if entries.is_empty() {
                    "No recent calculations.".to_string()
                } else {
                    entries
                        .iter()
                        .map(|e| e.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            })?;
        }
    }

    Ok(())
}

fn render_state(state: &DisplayState) -> String {
    match &state.error {
        Some(error) => format!("{} ({error})", state.expression),
        None => state.expression.clone(),
    }
}

fn print<T: serde::Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}
