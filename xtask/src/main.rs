use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use csv_convert_core::data_type::{classify_object_key, DataType};
use csv_convert_core::transform::convert_csv_file;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "csv_convert_lambda";
const LAMBDA_BINARY: &str = "csv_to_json";

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the CSV-to-JSON converter workspace",
    long_about = "A unified CLI for packaging the converter Lambda, running CI checks,\n\
                  and converting CSV files locally the way the Lambda does."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run CI checks (fmt, clippy, tests)
    Ci,
    /// Convert a local CSV file to JSON with the Lambda's record mapping
    Convert {
        /// CSV file with a header row
        input: PathBuf,
        /// Output path; defaults to the input path with a `.json` extension
        #[arg(long)]
        output: Option<PathBuf>,
        /// Record shape; inferred from the input file name when omitted
        #[arg(long, value_enum)]
        data_type: Option<DataTypeArg>,
    },
    /// Build and package the converter Lambda as a `bootstrap` zip
    LambdaPackage {
        /// Compilation target triple for the Lambda binary
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for the binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DataTypeArg {
    Students,
    Teachers,
    Classrooms,
}

impl From<DataTypeArg> for DataType {
    fn from(value: DataTypeArg) -> Self {
        match value {
            DataTypeArg::Students => DataType::Students,
            DataTypeArg::Teachers => DataType::Teachers,
            DataTypeArg::Classrooms => DataType::Classrooms,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn package_lambda(target: &str, profile: BuildProfile) {
    ensure_rust_target_installed(target);

    step("Build converter lambda binary");

    let mut cargo_args = vec![
        "build",
        "-p",
        LAMBDA_PACKAGE,
        "--target",
        target,
        "--bin",
        LAMBDA_BINARY,
    ];
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    run_cargo(&cargo_args);

    step("Package lambda zip artifact");
    let dist_dir = Path::new("dist");
    fs::create_dir_all(dist_dir).expect("failed to create lambda dist directory");

    let zip_path = dist_dir.join(format!("{LAMBDA_BINARY}.zip"));
    package_lambda_zip(&lambda_binary_path(target, profile), &zip_path);

    eprintln!("\nPackaged artifact:\n- {}", zip_path.display());
}

fn lambda_binary_path(target: &str, profile: BuildProfile) -> PathBuf {
    Path::new("target")
        .join(target)
        .join(profile.dir_name())
        .join(LAMBDA_BINARY)
}

fn ensure_rust_target_installed(target: &str) {
    let output = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output();

    let output = match output {
        Ok(value) => value,
        Err(error) => {
            eprintln!(
                "warning: failed to run `rustup target list --installed` ({error}); continuing without target preflight"
            );
            return;
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "failed to list installed rust targets; run `rustup target list --installed` manually. details: {}",
            stderr.trim()
        );
    }

    let installed = String::from_utf8_lossy(&output.stdout);
    if !installed.lines().any(|line| line.trim() == target) {
        panic!(
            "required rust target `{target}` is not installed. install it with `rustup target add {target}` and re-run `cargo run -p xtask -- lambda-package`"
        );
    }
}

fn package_lambda_zip(binary_path: &Path, zip_path: &Path) {
    if !binary_path.exists() {
        panic!("expected lambda binary at '{}'", binary_path.display());
    }

    let binary = fs::read(binary_path).expect("failed to read lambda binary");
    let file = fs::File::create(zip_path).expect("failed to create lambda zip");
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .expect("failed to start bootstrap entry in lambda zip");
    zip.write_all(&binary)
        .expect("failed to write bootstrap entry");
    zip.finish().expect("failed to finish lambda zip");
}

fn convert_local(input: &Path, output: Option<PathBuf>, data_type: Option<DataTypeArg>) {
    let data_type = match data_type {
        Some(value) => DataType::from(value),
        None => {
            let file_name = input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            classify_object_key(&file_name).unwrap_or_else(|| {
                eprintln!(
                    "cannot infer data type from '{file_name}'; pass --data-type students|teachers|classrooms"
                );
                exit(2);
            })
        }
    };
    let output = output.unwrap_or_else(|| input.with_extension("json"));

    match convert_csv_file(input, &output, data_type) {
        Ok(records) => eprintln!(
            "wrote {records} {data_type} record(s) to {}",
            output.display()
        ),
        Err(error) => {
            eprintln!("conversion failed: {error}");
            exit(1);
        }
    }
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test csv_convert_core");
    run_cargo(&["test", "-p", "csv_convert_core"]);

    step("Test csv_convert_lambda");
    run_cargo(&["test", "-p", LAMBDA_PACKAGE]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci => {
            ci_check();
            eprintln!("\nCI job passed.");
        }
        Commands::Convert {
            input,
            output,
            data_type,
        } => convert_local(&input, output, data_type),
        Commands::LambdaPackage { target, profile } => {
            package_lambda(&target, profile);
        }
    }
}
