//! Lobe0 CLI
//!
//! Usage:
//!   lobe0                                        # Reference machine, empirical lobes
//!   lobe0 --method zoa --rpm 2000..12000@500     # Closed-form boundary
//!   lobe0 --natural-frequency 1000 --damping-ratio 0.02
//!   lobe0 --config request.json --json           # Request from file, JSON output
//!   lobe0 --compare                              # Damping comparison
//!   lobe0 --serve                                # HTTP API server

use clap::Parser;
use colored::Colorize;
use std::f64::consts::PI;

use lobe0::core::{
    build_report, init_tracing, parse_speed_spec, run_server, save_report, DampingSweep,
    SweepCurve,
};
use lobe0::types::{
    AnalysisRequest, BoundaryMethod, CuttingGeometry, LobeAnalysisResult, LobeReport,
    PhysicalSystem, SpeedSpec, SystemSpec,
};
use lobe0::{SAFETY_FACTOR, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "lobe0",
    version = VERSION,
    about = "Lobe0 - Milling chatter stability lobe diagrams",
    long_about = "Lobe0 predicts, per spindle speed, the largest axial depth of cut that\n\
                  stays free of regenerative chatter for a single-mode machine.\n\n\
                  Methods:\n  \
                  empirical  Harmonic-matching lobes (illustrative approximation)\n  \
                  zoa        Closed-form zero-order approximation\n\n\
                  Modes:\n  \
                  (default)  Evaluate and analyze one curve\n  \
                  --compare  Compare damping ratios 0.01 / 0.02 / 0.03\n  \
                  --serve    HTTP API server mode"
)]
struct Args {
    /// Modal mass (kg)
    #[arg(long, default_value_t = 0.5)]
    mass: f64,

    /// Damping coefficient (N·s/m)
    #[arg(long, default_value_t = 80.0)]
    damping: f64,

    /// Stiffness (N/m)
    #[arg(long, default_value_t = 2e7)]
    stiffness: f64,

    /// Natural frequency (Hz); with --damping-ratio replaces mass/damping/stiffness
    #[arg(long, requires = "damping_ratio")]
    natural_frequency: Option<f64>,

    /// Damping ratio (used with --natural-frequency)
    #[arg(long, requires = "natural_frequency")]
    damping_ratio: Option<f64>,

    /// Number of teeth
    #[arg(short = 'n', long, default_value_t = 4)]
    teeth: u32,

    /// Tangential cutting coefficient (N/m²)
    #[arg(long, default_value_t = 6e8)]
    kt: f64,

    /// Radial / tangential force ratio
    #[arg(long, default_value_t = 0.3)]
    kr: f64,

    /// Entry angle (rad)
    #[arg(long, default_value_t = 0.0)]
    entry: f64,

    /// Exit angle (rad)
    #[arg(long, default_value_t = PI)]
    exit: f64,

    /// Spindle speeds: START:END[:POINTS], START..END[@POINTS] or S1,S2,...
    #[arg(short, long, default_value = "1000:20000:1500", value_parser = parse_rpm)]
    rpm: SpeedSpec,

    /// Boundary method: empirical or zoa
    #[arg(short, long, default_value = "empirical")]
    method: BoundaryMethod,

    /// Load the analysis request from a JSON file (overrides machine flags)
    #[arg(long)]
    config: Option<String>,

    /// Compare damping ratios instead of a single run
    #[arg(long)]
    compare: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show modal data, coefficients and extrema
    #[arg(long)]
    verbose: bool,

    /// Directory for reports (default: ./reports)
    #[arg(long, default_value = "./reports")]
    report_dir: String,

    /// Disable saving reports
    #[arg(long)]
    no_report: bool,
}

fn parse_rpm(s: &str) -> Result<SpeedSpec, String> {
    parse_speed_spec(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing();

    if args.no_color {
        colored::control::set_override(false);
    }

    if args.serve {
        run_serve(&args).await;
    } else if args.compare {
        run_compare(&args);
    } else {
        run_single(&args);
    }
}

/// Build the request from --config or from the flags
fn request_from_args(args: &Args) -> Result<AnalysisRequest, String> {
    if let Some(ref path) = args.config {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config '{}': {}", path, e))?;
        return serde_json::from_str(&json)
            .map_err(|e| format!("invalid config '{}': {}", path, e));
    }

    let system = match (args.natural_frequency, args.damping_ratio) {
        (Some(natural_frequency_hz), Some(damping_ratio)) => SystemSpec::Modal {
            natural_frequency_hz,
            damping_ratio,
        },
        _ => SystemSpec::Physical(PhysicalSystem::new(args.mass, args.damping, args.stiffness)),
    };

    Ok(AnalysisRequest {
        system,
        geometry: CuttingGeometry {
            entry_angle: args.entry,
            exit_angle: args.exit,
            teeth: args.teeth,
            kt: args.kt,
            kr: args.kr,
        },
        speeds: args.rpm.clone(),
        method: args.method,
    })
}

fn fail(message: &str) -> ! {
    eprintln!("{} {}", "error:".red().bold(), message);
    std::process::exit(1);
}

/// Evaluate and analyze one curve
fn run_single(args: &Args) {
    let request = request_from_args(args).unwrap_or_else(|e| fail(&e));
    let report = build_report(&request).unwrap_or_else(|e| fail(&e.to_string()));

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&e.to_string()),
        }
    } else if args.no_color && !args.verbose {
        println!("{}", report.to_parseable_string());
    } else {
        print_header("Stability Lobes");
        print_system(&report);
        if args.verbose {
            print_verbose(&report);
        }
        print_analysis(&report.analysis);
    }

    if !args.no_report {
        match save_report(&report, &args.report_dir) {
            Ok(path) if !args.json => println!("\n{} {}", "Report saved:".cyan(), path),
            Ok(_) => {}
            Err(e) => eprintln!("{} {}", "Report save failed:".red(), e),
        }
    }
}

/// Damping comparison
fn run_compare(args: &Args) {
    let sweep = DampingSweep {
        method: args.method,
        ..DampingSweep::default()
    };
    let curves = sweep.run().unwrap_or_else(|e| fail(&e.to_string()));

    if args.json {
        match serde_json::to_string_pretty(&curves) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&e.to_string()),
        }
        return;
    }

    print_header("Effect of Damping Ratio");
    println!(
        "f_n = {:.1} Hz | N = {} | method = {}",
        sweep.natural_frequency_hz,
        sweep.geometry.teeth,
        sweep.method.label()
    );
    println!();
    for c in &curves {
        print_sweep_line(c);
    }
}

fn print_sweep_line(c: &SweepCurve) {
    match c.analysis.best {
        Some(best) => println!(
            "  {:<14} valid={:<5} best={:>6.0} RPM  max depth={:.3} mm",
            c.label().bold(),
            c.analysis.valid_count,
            best.speed,
            best.depth
        ),
        None => println!("  {:<14} {}", c.label().bold(), "no stable depth found".yellow()),
    }
}

/// Print header
fn print_header(title: &str) {
    println!("{}", "=".repeat(70).bold());
    println!("{}", format!("  Lobe0 v{} - {}", VERSION, title).bold());
    println!("{}", "=".repeat(70).bold());
    println!();
}

fn print_system(report: &LobeReport) {
    let m = &report.metadata;
    println!("{}", "System Parameters:".bold());
    println!("  - Natural frequency: f_n = {:.1} Hz", m.f_n);
    println!("  - Damping ratio: zeta = {:.4}", m.zeta);
    println!("  - Number of teeth: N = {}", m.teeth);
    println!("  - Cutting coefficient: Kt = {:.2} x 10^8 N/m^2", m.kt / 1e8);
    println!("  - Method: {}", report.method.label());
    println!("  - Data points: {}", report.curve.len());
    println!();
}

fn print_verbose(report: &LobeReport) {
    println!("{}", "Details:".bold());
    println!("  - omega_n = {:.2} rad/s", report.modal.natural_frequency_rad_s);
    println!(
        "  - g0 = {:.4} | h0 = {:.4} | Lambda = {:.4}",
        report.coefficients.g0, report.coefficients.h0, report.coefficients.lambda
    );
    if let Some(mean) = report.analysis.mean_depth {
        println!("  - Mean critical depth: {:.3} mm", mean);
    }
    for p in &report.analysis.minima {
        println!("  - {} {:.0} RPM, {:.3} mm", "Min point:".red(), p.speed, p.depth);
    }
    for p in &report.analysis.maxima {
        println!("  - {} {:.0} RPM, {:.3} mm", "Max point:".green(), p.speed, p.depth);
    }
    println!("  - Input digest: {}", report.input_digest);
    println!();
}

/// Print the analysis the way an operator reads it
fn print_analysis(analysis: &LobeAnalysisResult) {
    let (Some(range), Some(best), Some(worst)) = (analysis.depth_range, analysis.best, analysis.worst) else {
        println!("{}", "No stable depth found at any speed (all points undefined).".yellow());
        return;
    };

    println!("{}", "Analysis Results:".bold());
    println!("  - Valid data points: {}", analysis.valid_count);
    println!("  - Critical depth range: {:.2} - {:.2} mm", range.min, range.max);
    println!();

    println!("{}", "Optimal Cutting Parameters:".green().bold());
    println!("  - Best speed: {:.0} RPM", best.speed);
    println!("  - Max stable depth: {:.2} mm", best.depth);
    if let Some(recommended) = analysis.recommended_depth {
        println!(
            "  - Recommended depth ({:.0}% safety): {:.2} mm",
            SAFETY_FACTOR * 100.0,
            recommended
        );
    }
    println!();

    println!("{}", "Worst Parameters (avoid):".red().bold());
    println!("  - Worst speed: {:.0} RPM", worst.speed);
    println!("  - Min stable depth: {:.2} mm", worst.depth);

    if !analysis.stable_bands.is_empty() {
        println!();
        println!("{}", "Stable Speed Regions:".bold());
        for (i, band) in analysis.stable_bands.iter().enumerate() {
            println!("  Region {}: {:.0} - {:.0} RPM", i + 1, band.start, band.end);
        }
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    let report_dir = (!args.no_report).then(|| args.report_dir.clone());
    if let Err(e) = run_server(&args.addr, report_dir).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
