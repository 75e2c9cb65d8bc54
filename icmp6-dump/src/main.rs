use std::fs;
use std::io::Read;
use std::net::Ipv6Addr;
use std::path::PathBuf;

use clap::Parser;
use icmp6_wire::packet::checksum;
use icmp6_wire::packet::icmp6::opt::NdOptionValue;
use icmp6_wire::packet::icmp6::Icmp6Packet;
use serde::Serialize;
use tracing::{error, info, warn};

mod stats;

#[derive(Parser, Debug)]
#[command(name = "icmp6-dump")]
#[command(about = "ICMPv6 message decoder", long_about = None)]
struct Args {
    /// Input file; reads stdin when omitted. Hex mode expects one message
    /// per line (whitespace between octets allowed, '#' starts a comment)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Treat the input as raw binary holding a single message
    #[arg(short, long)]
    raw: bool,

    /// Source address of the enclosing IPv6 datagram (enables checksum
    /// verification)
    #[arg(long, requires = "dst")]
    src: Option<Ipv6Addr>,

    /// Destination address of the enclosing IPv6 datagram
    #[arg(long, requires = "src")]
    dst: Option<Ipv6Addr>,

    /// Print decoded option and extension detail
    #[arg(short, long)]
    dump_options: bool,

    /// Emit a JSON summary per message instead of text
    #[arg(long)]
    json: bool,

    /// Print statistics at the end
    #[arg(short, long)]
    stats: bool,
}

#[derive(Serialize)]
struct Summary {
    msg_type: String,
    msg_type_value: u8,
    code: u8,
    checksum: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    checksum_valid: Option<bool>,
    size: usize,
    inner_size: usize,
    options: Vec<NdOptionValue>,
    extension_objects: usize,
}

fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut stats = stats::Stats::default();

    let messages = match read_messages(&args) {
        Ok(messages) => messages,
        Err(e) => {
            error!("Failed to read input: {}", e);
            std::process::exit(1);
        }
    };
    info!("Read {} message(s)", messages.len());

    for (index, bytes) in messages.iter().enumerate() {
        process_message(index + 1, bytes, &args, &mut stats);
    }

    if args.stats {
        println!("{stats}");
    }
}

/// Collect message byte strings from the configured input.
fn read_messages(args: &Args) -> Result<Vec<Vec<u8>>, String> {
    let contents = match &args.input {
        Some(path) => fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| e.to_string())?;
            buf
        }
    };

    if args.raw {
        return Ok(vec![contents]);
    }

    let text = String::from_utf8(contents).map_err(|_| "hex input is not valid UTF-8".to_string())?;
    let mut messages = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let bytes = parse_hex(line).map_err(|e| format!("line {}: {e}", lineno + 1))?;
        messages.push(bytes);
    }
    Ok(messages)
}

/// Parse a hex string, ignoring whitespace between octets.
fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err("odd number of hex digits".to_string());
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| format!("invalid hex at offset {i}"))
        })
        .collect()
}

fn process_message(index: usize, bytes: &[u8], args: &Args, stats: &mut stats::Stats) {
    let packet = match Icmp6Packet::from_bytes(bytes) {
        Ok(packet) => packet,
        Err(e) => {
            stats.parse_errors += 1;
            error!("message {}: {}", index, e);
            return;
        }
    };

    stats.record(&packet, bytes.len());

    let checksum_valid = args
        .src
        .zip(args.dst)
        .map(|(src, dst)| checksum::verify(&src, &dst, bytes));
    match checksum_valid {
        Some(true) => stats.checksum_ok += 1,
        Some(false) => stats.checksum_bad += 1,
        None => {}
    }

    let options: Vec<NdOptionValue> = packet
        .options()
        .iter()
        .map(|opt| {
            opt.decode().unwrap_or_else(|e| {
                warn!("message {}: undecodable option {}: {}", index, opt.kind(), e);
                NdOptionValue::Unknown {
                    kind: opt.kind().into(),
                    payload: opt.payload().to_vec(),
                }
            })
        })
        .collect();

    if args.json {
        let summary = Summary {
            msg_type: packet.msg_type().to_string(),
            msg_type_value: packet.msg_type().into(),
            code: packet.code(),
            checksum: packet.checksum(),
            checksum_valid,
            size: bytes.len(),
            inner_size: packet.inner_size(),
            options,
            extension_objects: packet.extensions().objects().len(),
        };
        match serde_json::to_string(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("message {}: {}", index, e),
        }
        return;
    }

    println!("{:>5}   ({} bytes)   {}", index, bytes.len(), packet);
    if let Some(valid) = checksum_valid {
        println!("        checksum {}", if valid { "ok" } else { "BAD" });
    }
    if args.dump_options {
        for (opt, value) in packet.options().iter().zip(&options) {
            println!("        {:<32} {:?}", opt.to_string(), value);
        }
        for object in packet.extensions().objects() {
            println!(
                "        extension class={} subtype={} ({} bytes)",
                object.class_num(),
                object.class_subtype(),
                object.payload().len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_variants() {
        assert_eq!(parse_hex("8000abcd").unwrap(), vec![0x80, 0x00, 0xab, 0xcd]);
        assert_eq!(
            parse_hex("80 00 ab cd").unwrap(),
            vec![0x80, 0x00, 0xab, 0xcd]
        );
        assert!(parse_hex("800").is_err());
        assert!(parse_hex("80zz").is_err());
    }
}
