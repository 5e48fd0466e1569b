// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod bootstrap;
mod builtins;
mod burner;

use anyhow::Result;
use structopt::StructOpt;

use pleroma_config::Opt;

fn main() -> Result<()> {
    pretty_env_logger::init();
    let opt = Opt::from_args();

    match opt {
        Opt::Start(start_opt) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(bootstrap::run(start_opt))
        }
        Opt::Test { file } => run_test(&file),
    }
}

/// `test <file>`: parse/typecheck only, exit (§6). The front end that
/// would do the parsing is the out-of-scope evaluator adapter (§1); this
/// just validates that the file exists and is readable, which is all the
/// core runtime itself is responsible for before handing off to it.
fn run_test(file: &std::path::Path) -> Result<()> {
    let _ = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("cannot read program file {}: {e}", file.display()))?;
    log::info!("{} read OK (parsing is the evaluator's responsibility)", file.display());
    Ok(())
}
