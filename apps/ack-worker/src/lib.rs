//! Quote-acknowledgement Worker - serverless HTTP surface
//!
//! Routes the quote form's POST to the acknowledgement handler, answers
//! liveness checks and CORS preflights, and serves the static robots.txt.
//! Each invocation is a stateless request/response cycle; the only side
//! effects are the outbound MailChannels calls.

use worker::*;

mod ack;
mod mailchannels;

const ROBOTS_BODY: &str = "User-agent: *\nAllow: /\n\nSitemap: https://oxfordexecutivetravel.co.uk/sitemap.xml\n";

#[event(fetch)]
async fn main(req: Request, env: Env, ctx: Context) -> Result<Response> {
    // CORS preflight
    if req.method() == Method::Options {
        return cors_response(Response::empty().map(|r| r.with_status(204)));
    }

    let path = req.path();

    match (req.method(), path.as_str()) {
        // Liveness (public, no dispatch)
        (Method::Get, "/health") => cors_response(Response::ok("OK")),
        (Method::Get, "/api/ack") => {
            cors_response(Response::from_json(&serde_json::json!({ "ok": true })))
        }

        (Method::Post, "/api/ack") => match ack::handle(req, env, ctx).await {
            Ok(resp) => Ok(resp),
            // Last-resort catch: never let an unexpected failure escape as
            // an unstructured error
            Err(err) => {
                console_log!("Unhandled error in ack handler: {}", err);
                cors_response(error_json(500, "Internal error"))
            }
        },

        (Method::Get, "/robots.txt") => robots_response(),

        _ => cors_response(error_json(404, "Not found")),
    }
}

fn robots_response() -> Result<Response> {
    let mut resp = Response::ok(ROBOTS_BODY)?;
    let headers = resp.headers_mut();
    headers.set("Content-Type", "text/plain; charset=utf-8")?;
    headers.set("Cache-Control", "public, max-age=3600")?;
    cors_response(Ok(resp))
}

fn error_json(status: u16, message: &str) -> Result<Response> {
    let resp = Response::from_json(&serde_json::json!({ "ok": false, "error": message }))?;
    Ok(resp.with_status(status))
}

fn cors_response(response: Result<Response>) -> Result<Response> {
    response.map(|mut r| {
        let headers = r.headers_mut();
        let _ = headers.set("Access-Control-Allow-Origin", "*");
        let _ = headers.set("Access-Control-Allow-Methods", "GET, POST, OPTIONS");
        let _ = headers.set("Access-Control-Allow-Headers", "Content-Type");
        r
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_body_is_a_valid_exclusion_document() {
        assert!(ROBOTS_BODY.starts_with("User-agent: *\n"));
        assert!(ROBOTS_BODY.contains("Allow: /"));
        assert!(ROBOTS_BODY.contains("Sitemap: https://"));
        assert!(ROBOTS_BODY.ends_with('\n'));
    }
}
