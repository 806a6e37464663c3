//! Call-control documents for the telephony platform.
//!
//! The document schema is owned by the platform; only the two shapes this
//! service emits are modeled here.

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Instruct the platform to bridge the call to a named client endpoint.
/// Fire and forget: the platform handles ringing and connection from here.
pub fn dial_client(client: &str) -> String {
    format!(
        "{XML_HEADER}<Response><Dial><Client>{}</Client></Dial></Response>",
        escape(client)
    )
}

/// Speak a short message to the caller.
pub fn say(message: &str) -> String {
    format!(
        "{XML_HEADER}<Response><Say>{}</Say></Response>",
        escape(message)
    )
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
