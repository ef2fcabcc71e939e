use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    // args: <name> [<name> ...]
    let names: Vec<String> = env::args().skip(1).collect();
    if names.is_empty() {
        eprintln!("usage: sysctl-dump <name> [<name> ...]");
        return ExitCode::FAILURE;
    }
    run(&names)
}

#[cfg(target_os = "freebsd")]
fn run(names: &[String]) -> ExitCode {
    let mut failed = false;
    for name in names {
        match dump(name) {
            Ok(rendered) => println!("{name}: {rendered}"),
            Err(e) => {
                eprintln!("sysctl-dump: {name}: {e}");
                failed = true;
            }
        }
    }
    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

#[cfg(target_os = "freebsd")]
fn dump(name: &str) -> Result<String, freebsd_sysctl::SysctlError> {
    use freebsd_sysctl::{mib, sysctl};
    use sysctl_abi::Kind;

    let path = mib::resolve(name)?;
    let format = mib::format_of(path.components())?;
    let bytes = sysctl::read_raw(path.components())?;

    // Let the node's own description pick the decoding.
    let rendered = match format.value_kind() {
        Some(Kind::I32) if format.is_temperature() => {
            let raw = sysctl_abi::decode_i32(&bytes)?;
            match format.temperature_celsius(raw) {
                Some(celsius) => format!("{celsius:.1}C"),
                None => raw.to_string(),
            }
        }
        Some(kind) => decode_possibly_array(kind, &bytes)?.to_string(),
        None => render_opaque(&format, &bytes),
    };
    Ok(rendered)
}

/// Some fixed-size nodes hand back several elements at once; the buffer
/// length decides whether this is a scalar or an array.
#[cfg(target_os = "freebsd")]
fn decode_possibly_array(
    kind: sysctl_abi::Kind,
    bytes: &[u8],
) -> Result<sysctl_abi::Value, sysctl_abi::DecodeError> {
    match kind.fixed_size() {
        Some(size) if bytes.len() > size && bytes.len() % size == 0 => {
            sysctl_abi::decode_array(kind, bytes)
        }
        _ => sysctl_abi::decode(kind, bytes),
    }
}

#[cfg(target_os = "freebsd")]
fn render_opaque(format: &sysctl_abi::NodeFormat, bytes: &[u8]) -> String {
    use sysctl_abi::ntptimeval;

    // The one opaque layout this tool knows by name.
    if format.format() == "S,ntptimeval" {
        if let Ok(record) = ntptimeval::LAYOUT.decode(bytes) {
            return record.to_string();
        }
    }
    format!(
        "{} ({} bytes)",
        sysctl_abi::Value::Bytes(bytes.to_vec()),
        bytes.len()
    )
}

#[cfg(not(target_os = "freebsd"))]
fn run(_names: &[String]) -> ExitCode {
    eprintln!("sysctl-dump: the sysctl interface only exists on FreeBSD");
    ExitCode::FAILURE
}
