// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::PathBuf;

use structopt::StructOpt;

/// Command-line surface (§6): `start` runs a node, `test <file>` parses
/// and typechecks a program without running it.
#[derive(Debug, StructOpt)]
#[structopt(name = "pleroma", about = "a distributed actor runtime")]
pub enum Opt {
    /// Start a node.
    Start(StartOpt),
    /// Parse and typecheck a program file, then exit.
    Test {
        #[structopt(parse(from_os_str))]
        file: PathBuf,
    },
}

#[derive(Debug, StructOpt)]
pub struct StartOpt {
    #[structopt(long, default_value = "0.0.0.0")]
    pub local_host: String,

    #[structopt(long, default_value = "1234")]
    pub local_port: u16,

    /// If absent, the node boots fresh (inoculates) rather than joining
    /// an existing cluster.
    #[structopt(long)]
    pub remote_host: Option<String>,

    #[structopt(long, default_value = "1234")]
    pub remote_port: u16,

    #[structopt(long, parse(from_os_str), default_value = "pleroma.json")]
    pub config: PathBuf,

    #[structopt(long, parse(from_os_str))]
    pub program: Option<PathBuf>,

    /// Bootstrap entity name, used when inoculating.
    #[structopt(long, default_value = "Monad")]
    pub entity: String,

    /// Number of burner threads (§4.5 step 7, §5: "N burner threads (N
    /// >= 1)"). Defaults to the number of available CPUs when absent.
    #[structopt(long)]
    pub burners: Option<usize>,

    /// Host the Prometheus `/metrics` exposition endpoint binds to.
    #[structopt(long, default_value = "127.0.0.1")]
    pub metrics_host: String,

    /// Port the Prometheus `/metrics` exposition endpoint binds to.
    #[structopt(long, default_value = "9090")]
    pub metrics_port: u16,
}
