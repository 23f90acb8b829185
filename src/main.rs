use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use model3_restyle::parser::{ContentSource, FsSource, load_model};
use model3_restyle::scan::scan_model_styles;
use model3_restyle::styles::{extract_qml_paths, replace_qml_paths};

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract & rewrite QML style references in QGIS .model3 files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the QML style paths referenced by a model file
    List {
        /// QGIS processing model (.model3) file
        #[arg(value_name = "MODEL3_FILE")]
        model: Utf8PathBuf,
    },
    /// Find .model3 files under a directory and print their style references
    Scan {
        /// Directory to search, e.g. a profile's processing/models folder
        #[arg(value_name = "DIR")]
        dir: Utf8PathBuf,
    },
    /// Rewrite style references to point into a models directory
    Retarget {
        /// QGIS processing model (.model3) file
        #[arg(value_name = "MODEL3_FILE")]
        model: Utf8PathBuf,
        /// Directory the rewritten QML paths should point into, taken
        /// verbatim (separator style included)
        #[arg(long, value_name = "DIR")]
        models_dir: String,
        /// Write the result to this file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<Utf8PathBuf>,
        /// Overwrite the model file itself
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
    },
    /// Print the parsed Option tree of a model file as JSON
    Dump {
        /// QGIS processing model (.model3) file
        #[arg(value_name = "MODEL3_FILE")]
        model: Utf8PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut source = FsSource;

    match cli.command {
        Command::List { model } => {
            let text = source.read_to_string(&model)?;
            for path in extract_qml_paths(&text) {
                println!("{}", path);
            }
        }
        Command::Scan { dir } => {
            for entry in scan_model_styles(&dir)? {
                println!("{}", entry.model);
                for path in &entry.qml_paths {
                    println!("  {}", path);
                }
            }
        }
        Command::Retarget {
            model,
            models_dir,
            output,
            in_place,
        } => {
            let text = source.read_to_string(&model)?;
            let rewritten = replace_qml_paths(&text, &models_dir);
            if in_place {
                write_text(&model, &rewritten)?;
            } else if let Some(output) = output {
                write_text(&output, &rewritten)?;
            } else {
                print!("{}", rewritten);
            }
        }
        Command::Dump { model } => {
            let doc = load_model(&model, &mut source)?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}

fn write_text(path: &Utf8PathBuf, text: &str) -> Result<()> {
    std::fs::write(path.as_str(), text).with_context(|| format!("Failed to write {}", path))
}
