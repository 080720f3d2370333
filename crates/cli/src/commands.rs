//! `ringctl` subcommands.

use std::fmt;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use corelib::topology::Topology;
use corelib::{RingSelector, ServerAddr, WeightedServer};
use tracing::info;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the server each key maps to.
    Pick {
        /// Keys to look up.
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Show vnode counts and hash-space share per server.
    Inspect,

    /// Count how many keys move when one server is removed.
    Diff {
        /// Address of the server to remove, as configured.
        #[arg(short, long)]
        remove: String,

        /// Number of synthetic keys to sample.
        #[arg(short = 'n', long, default_value = "10000")]
        sample: usize,
    },
}

/// Output of a command, rendered with `Display`.
#[derive(Debug)]
pub enum CommandResult {
    Picks(Vec<(String, ServerAddr)>),
    Inspect(Topology),
    Diff {
        sample: usize,
        moved: usize,
        /// Keys that moved although the removed server did not own them.
        unexpected: usize,
    },
}

impl Command {
    pub fn execute(&self, servers: &[WeightedServer]) -> Result<CommandResult> {
        let selector = RingSelector::new();
        selector
            .set_servers(servers)
            .context("failed to build ring")?;

        match self {
            Command::Pick { keys } => {
                let picks = keys
                    .iter()
                    .map(|key| selector.pick_server(key).map(|addr| (key.clone(), addr)))
                    .collect::<corelib::Result<Vec<_>>>()?;
                Ok(CommandResult::Picks(picks))
            }
            Command::Inspect => Ok(CommandResult::Inspect(Topology::of(&selector.snapshot()))),
            Command::Diff { remove, sample } => diff(&selector, servers, remove, *sample),
        }
    }
}

fn diff(
    selector: &RingSelector,
    servers: &[WeightedServer],
    remove: &str,
    sample: usize,
) -> Result<CommandResult> {
    let remaining: Vec<WeightedServer> = servers
        .iter()
        .filter(|s| s.addr != remove)
        .cloned()
        .collect();
    if remaining.len() == servers.len() {
        bail!("{} is not in the server list", remove);
    }
    if remaining.is_empty() {
        bail!("removing {} would leave no servers", remove);
    }

    let before = selector.snapshot();
    let removed: Vec<&ServerAddr> = before
        .servers()
        .iter()
        .filter(|s| s.name == remove)
        .map(|s| &s.addr)
        .collect();

    let after = RingSelector::new();
    after.set_servers(&remaining)?;

    let (mut moved, mut unexpected) = (0, 0);
    for k in 0..sample {
        let key = format!("key-{}", k);
        let old = selector.pick_server(&key)?;
        let new = after.pick_server(&key)?;
        if old != new {
            moved += 1;
            if !removed.contains(&&old) {
                unexpected += 1;
            }
        }
    }

    info!(sample, moved, unexpected, "sampled key movement");
    Ok(CommandResult::Diff {
        sample,
        moved,
        unexpected,
    })
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Picks(picks) => {
                for (key, addr) in picks {
                    writeln!(f, "{} -> {}", key, addr)?;
                }
                Ok(())
            }
            CommandResult::Inspect(topology) => {
                writeln!(
                    f,
                    "{:<32} {:>6} {:>7} {:>7} {:>8}",
                    "server", "weight", "planned", "vnodes", "share"
                )?;
                for s in &topology.servers {
                    writeln!(
                        f,
                        "{:<32} {:>6} {:>7} {:>7} {:>7.2}%",
                        s.name,
                        s.weight,
                        s.planned_vnodes,
                        s.vnodes,
                        s.share() * 100.0
                    )?;
                }
                Ok(())
            }
            CommandResult::Diff {
                sample,
                moved,
                unexpected,
            } => {
                let pct = if *sample == 0 {
                    0.0
                } else {
                    *moved as f64 * 100.0 / *sample as f64
                };
                writeln!(f, "{} of {} keys moved ({:.2}%)", moved, sample, pct)?;
                writeln!(f, "{} moved off servers that were kept", unexpected)
            }
        }
    }
}
