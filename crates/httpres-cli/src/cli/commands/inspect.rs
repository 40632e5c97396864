//! `httpres inspect <ref>` – uri, source request and recorded headers of a reference.

use anyhow::Result;
use httpres_core::reference::to_request;

use super::reference_arg::load_reference;

pub fn run_inspect(arg: &str) -> Result<()> {
    let reference = load_reference(arg)?;
    let (request, _) = to_request(&reference, &[])?;

    println!("uri:     {}", reference.uri());
    println!("method:  {}", request.method().unwrap_or("(default GET)"));
    let mut names: Vec<&String> = request.headers().keys().collect();
    names.sort();
    for name in names {
        println!("  > {}: {}", name, request.headers()[name]);
    }
    if !request.body().is_empty() {
        println!("body:    {} bytes", request.body().len());
    }
    for (key, value) in request.options().iter() {
        println!("option:  {} = {}", key, value);
    }
    match reference.response_headers() {
        Some(headers) => {
            println!("response headers:");
            for (name, value) in headers.iter() {
                println!("  < {}: {}", name, value);
            }
        }
        None => println!("response headers: (not fetched yet)"),
    }
    Ok(())
}
