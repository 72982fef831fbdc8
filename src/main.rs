//! edroads command-line front end
//!
//! `--xml2csv`で指定されたSpreadsheetMLファイルをCSVに変換し、標準出力へ書き出します。

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use edroads::{ConverterBuilder, EdRoadsError};
use tracing_subscriber::EnvFilter;

/// edroads: process Edinburgh Council road names
#[derive(Parser, Debug)]
#[command(name = "edroads", version, disable_help_flag = true)]
struct Cli {
    /// Show usage
    #[arg(short = 'h', long = "help")]
    help: bool,

    /// Convert the given spreadsheet files to CSV on stdout
    #[arg(short = 'c', long = "xml2csv")]
    xml2csv: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,

    /// SpreadsheetML files, processed in order
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

const USAGE: &str = "\
edroads: process Edinburgh Council road names

  edroads --xml2csv file1.xls [file2.xls] [fileN.xls]

    Convert xls files to csv output. xls files should be XML spreadsheets
    converted from Edinburgh Council .pdfs using the pdftoexcelonline.com
    converter.
";

fn main() -> ExitCode {
    // 未知のオプションはclapがエラーを表示し、終了コード2で終了する
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // --xml2csvがない場合（--helpのみ、または引数なし）は使い方を表示
    if !cli.xml2csv {
        print!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match xml_to_csv(&cli.files) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            handle_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// 全ファイルを変換してからCSVを書き出す（失敗時は何も出力しない）
fn xml_to_csv(files: &[PathBuf]) -> Result<(), EdRoadsError> {
    let converter = ConverterBuilder::new().build()?;
    let table = converter.extract_paths(files)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    converter.write_table(&table, &mut handle)?;
    handle.flush()?;

    Ok(())
}

fn handle_error(err: &EdRoadsError) {
    match err {
        EdRoadsError::FileAccess { path, source } => {
            eprintln!("edroads: cannot open '{}': {}", path.display(), source);
        }
        EdRoadsError::Parse {
            path,
            position,
            message,
        } => {
            eprintln!(
                "edroads: '{}' is not a valid XML spreadsheet (byte {}): {}",
                path.display(),
                position,
                message
            );
        }
        EdRoadsError::Io(io_err) => {
            eprintln!("edroads: failed to write output: {}", io_err);
        }
        EdRoadsError::Config(msg) => {
            eprintln!("edroads: configuration error: {}", msg);
        }
        EdRoadsError::SecurityViolation(msg) => {
            eprintln!("edroads: input rejected: {}", msg);
        }
    }
}
