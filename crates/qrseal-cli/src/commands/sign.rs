//! Sign command implementation.

use qrseal_canonical::{build, BuildRequest, Digest};
use qrseal_core::{seal, PrivateKey};

use super::{read_input, write_qr};
use crate::args::SignArgs;
use crate::config::Config;

pub fn run(args: SignArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let data = match (args.data, args.data_file.as_deref()) {
        (Some(data), _) => data,
        (None, path) => read_input(path)?,
    };

    let mut stamp = config.stamp;
    if args.timestamp {
        stamp.timestamp = true;
    }
    if let Some(timezone) = args.timezone {
        stamp.timezone = timezone;
    }
    if args.expires.is_some() {
        stamp.timestamp = true;
        stamp.expiration = true;
    }

    let request = BuildRequest {
        data,
        doc_id: args.doc_id,
        created_by: args.created_by,
        stamp,
        expiration: args.expires,
    };
    let payload = build(&request)?;

    let key = PrivateKey::load_pem(&args.key)?;
    let artifact = seal(payload, &key)?;
    let text = artifact.to_json()?;
    tracing::info!(
        fingerprint = %Digest::of(&artifact.payload().canonical_bytes()?),
        "artifact signed"
    );

    println!("{}", text);

    if let Some(out) = &args.out {
        let render = args.render.apply(&config.render);
        write_qr(&text, &render, args.render.logo_fallback, out)?;
    }
    Ok(())
}
