use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use starkit::{init_logging, load_config, Reply, Shell, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;
    let mut shell = Shell::new(config);

    println!("StarKit {} (built {}). Type 'help' for commands.", VERSION, BUILD_DATE);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        match shell.run_line(&line) {
            Ok(Reply::Quit) => break,
            Ok(Reply::Text(text)) if text.is_empty() => {}
            Ok(Reply::Text(text)) => writeln!(stdout, "{}", text)?,
            Err(e) => writeln!(stdout, "error: {}", e)?,
        }
        shell.poll();
        stdout.flush()?;
    }

    tracing::debug!("Input closed, exiting");
    Ok(())
}
