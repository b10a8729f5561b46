mod dump;
mod interp;
mod script;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::util::SubscriberInitExt;

use crate::dump::Span;
use crate::interp::Interp;

#[derive(Parser)]
#[command(name = "gbash")]
#[command(version, about = "Run GBA binding scripts on a simulated bus", long_about = None)]
struct Cli {
    /// Maximum level for log output
    #[arg(long, global = true, default_value_t = Level::WARN)]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a script, then print the requested memory
    Run {
        /// Script file, one call per line
        script: PathBuf,

        /// Region name or ADDR:LEN to hex dump after the run (repeatable)
        #[arg(short, long = "dump", value_name = "REGION")]
        dumps: Vec<Span>,
    },

    /// Show every namespace with its constants and methods
    List,
}

fn setup_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .compact()
        .finish()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level);

    match cli.command {
        Commands::Run { script, dumps } => run(&script, &dumps),
        Commands::List => {
            print!("{}", list(&Interp::new()));
            Ok(())
        }
    }
}

fn run(path: &Path, dumps: &[Span]) -> Result<()> {
    let source = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let stmts = script::parse(&source).with_context(|| format!("parsing {}", path.display()))?;
    info!("{}: {} statements", path.display(), stmts.len());

    let mut interp = Interp::new();
    for (line, value) in interp.run(&stmts)? {
        println!("{}: {}", line, value);
    }

    for span in dumps {
        print!("{}", dump::hexdump(&interp.console.bus, span)?);
    }
    Ok(())
}

fn list(interp: &Interp) -> String {
    let mut out = String::new();
    for (path, ns) in interp.registry.modules() {
        out.push_str(path);
        out.push('\n');
        for (name, value) in &ns.constants {
            out.push_str(&format!("  {} = {:#x}\n", name, value));
        }
        for (name, entry) in &ns.methods {
            out.push_str(&format!("  .{}/{}\n", name, entry.arity));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn run_script_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SRAM.write_string 0 \"ok\"").unwrap();
        writeln!(file, "Video::Palette.obj_set 1 Video.rgb5").unwrap();
        file.flush().unwrap();

        // constants need `::`; a bare call path is not a value
        let err = run(file.path(), &[]).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"), "{:#}", err);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# save slot").unwrap();
        writeln!(file, "SRAM.write_string 0 \"ok\"").unwrap();
        file.flush().unwrap();
        run(file.path(), &["sram".parse().unwrap()]).unwrap();
    }

    #[test]
    fn sprite_demo_runs() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/sprite.gbs");
        let source = fs::read_to_string(&path).unwrap();
        let mut interp = Interp::new();
        let echoed = interp.run(&script::parse(&source).unwrap()).unwrap();

        assert_eq!(echoed.len(), 1);
        assert_eq!(echoed[0].1, gba_script::Value::Int(8));
        assert_eq!(interp.console.bus.peek16(0x0500_0000), 0x001F);
        assert_eq!(interp.console.bus.peek16(0x0700_0000 + 5 * 8 + 2), 8 | 0x4000);
        assert_eq!(interp.console.bus.peek8(0x0601_001F), 0x11);
        assert_eq!(interp.console.bus.frames, 1);
    }

    #[test]
    fn missing_script_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.gbs");
        let err = run(&path, &[]).unwrap_err();
        assert!(format!("{:#}", err).starts_with("reading "));
    }

    #[test]
    fn list_shows_nested_namespaces() {
        let text = list(&Interp::new());
        assert!(text.contains("Video::OBJ\n"));
        assert!(text.contains("  ATTR0_DISABLED = 0x200\n"));
        assert!(text.contains("  .set_attr/3\n"));
        assert!(text.contains("  .vblank_intr_wait/0\n"));
    }

    #[test]
    fn cli_accepts_repeated_dumps() {
        let cli = Cli::try_parse_from(["gbash", "run", "demo.gbs", "--dump", "oam", "-d", "0x0E000000:16"]).unwrap();
        match cli.command {
            Commands::Run { dumps, .. } => {
                assert_eq!(dumps.len(), 2);
                assert_eq!(dumps[1].addr, 0x0E00_0000);
            }
            Commands::List => panic!("expected run"),
        }
        assert_eq!(cli.log_level, Level::WARN);
    }
}
