use std::process;

use clap::{App, Arg, SubCommand};
use tracing_subscriber::EnvFilter;

use audio_detective::audio::{FileSampleSource, MicSampleSource};
use audio_detective::{
    ComparisonResult, Detective, DetectiveConfig, FingerprintSummary, OutputFormat, SampleSource,
};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn parse_format(value: &str) -> OutputFormat {
    match value {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        _ => OutputFormat::Simple,
    }
}

fn main() {
    let matches = App::new("detective-cli")
        .version(audio_detective::VERSION)
        .about("An acoustic fingerprinting engine: extract and compare audio fingerprints")
        .subcommand(
            SubCommand::with_name("fingerprint")
                .about("Fingerprint an audio file and print its summary")
                .arg(
                    Arg::with_name("input")
                        .required(true)
                        .help("Input audio file path")
                        .index(1),
                )
                .arg(
                    Arg::with_name("format")
                        .short("f")
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output format: simple, json, csv")
                        .takes_value(true)
                        .default_value("simple"),
                )
                .arg(
                    Arg::with_name("verbose")
                        .short("v")
                        .long("verbose")
                        .help("Enable debug logging"),
                ),
        )
        .subcommand(
            SubCommand::with_name("compare")
                .about("Fingerprint two audio files and print their similarity")
                .arg(Arg::with_name("input1").required(true).index(1))
                .arg(Arg::with_name("input2").required(true).index(2))
                .arg(
                    Arg::with_name("range")
                        .long("range")
                        .value_name("BITS")
                        .help("Comparison range in bits")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("format")
                        .short("f")
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output format: simple, json, csv")
                        .takes_value(true)
                        .default_value("simple"),
                )
                .arg(
                    Arg::with_name("verbose")
                        .short("v")
                        .long("verbose")
                        .help("Enable debug logging"),
                ),
        )
        .subcommand(SubCommand::with_name("devices").about("List available audio input devices"))
        .subcommand(
            SubCommand::with_name("listen")
                .about("Fingerprint live microphone input")
                .arg(
                    Arg::with_name("device")
                        .short("d")
                        .long("device")
                        .value_name("DEVICE")
                        .help("Audio input device name")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("seconds")
                        .long("seconds")
                        .value_name("SECONDS")
                        .help("Seconds of audio to capture")
                        .takes_value(true)
                        .default_value("10"),
                )
                .arg(
                    Arg::with_name("format")
                        .short("f")
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output format: simple, json, csv")
                        .takes_value(true)
                        .default_value("simple"),
                )
                .arg(
                    Arg::with_name("verbose")
                        .short("v")
                        .long("verbose")
                        .help("Enable debug logging"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("fingerprint", Some(sub_matches)) => {
            let verbose = sub_matches.is_present("verbose");
            init_tracing(verbose);
            let input_file = sub_matches.value_of("input").unwrap();
            let format = parse_format(sub_matches.value_of("format").unwrap());

            let config = DetectiveConfig::default();
            let mut detective = match Detective::with_config(config.clone()) {
                Ok(detective) => detective,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };

            let mut source =
                match FileSampleSource::new(input_file, config.processing_sample_rate) {
                    Ok(source) => source,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        process::exit(1);
                    }
                };

            match detective.process_bounded(&mut source) {
                Ok(fingerprint) => {
                    let summary = FingerprintSummary::from_fingerprint(&fingerprint);
                    println!("{}", summary.render(format));
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
        ("compare", Some(sub_matches)) => {
            let verbose = sub_matches.is_present("verbose");
            init_tracing(verbose);
            let input1 = sub_matches.value_of("input1").unwrap();
            let input2 = sub_matches.value_of("input2").unwrap();
            let format = parse_format(sub_matches.value_of("format").unwrap());

            let config = DetectiveConfig::default();
            let range = sub_matches
                .value_of("range")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or_else(|| config.subfingerprint_bits());

            let mut source1 = match FileSampleSource::new(input1, config.processing_sample_rate) {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            let mut source2 = match FileSampleSource::new(input2, config.processing_sample_rate) {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };

            match Detective::compare(&config, &mut source1, &mut source2, range) {
                Ok(similarity) => {
                    let result = ComparisonResult::new(similarity);
                    println!("{}", result.render(format));
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
        ("devices", Some(_)) => match MicSampleSource::list_input_devices() {
            Ok(devices) => {
                println!("Available audio input devices:");
                for (i, device) in devices.iter().enumerate() {
                    println!("  {}: {}", i, device);
                }
            }
            Err(e) => {
                eprintln!("Error listing devices: {}", e);
                process::exit(1);
            }
        },
        ("listen", Some(sub_matches)) => {
            let verbose = sub_matches.is_present("verbose");
            init_tracing(verbose);
            let device = sub_matches.value_of("device");
            let format = parse_format(sub_matches.value_of("format").unwrap());
            let seconds: u64 = sub_matches
                .value_of("seconds")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10);

            let mut source = match MicSampleSource::new(device) {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };

            let config =
                DetectiveConfig::default().with_processing_sample_rate(source.sample_rate());
            let mut detective = match Detective::with_config(config.clone()) {
                Ok(detective) => detective,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };

            detective.start();
            let target_samples = seconds * source.sample_rate() as u64;
            let mut buf = vec![0.0f32; 4096];
            let mut consumed = 0u64;

            while consumed < target_samples {
                let n = match source.next_chunk(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        process::exit(1);
                    }
                };
                if let Err(e) = detective.feed(&buf[..n]) {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
                consumed += n as u64;
            }

            let fingerprint = detective.stop();
            let summary = FingerprintSummary::from_fingerprint(&fingerprint);
            println!("{}", summary.render(format));
        }
        _ => {
            eprintln!("No subcommand given. Use --help for usage.");
            process::exit(1);
        }
    }
}
