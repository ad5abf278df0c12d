//! Server-rendered HTML for the welcome, form and result pages.

use crate::types::PredictionResult;

const STYLE: &str = r#"
body { font-family: sans-serif; background: #eef4fb; color: #1e293b; margin: 0; }
main { max-width: 760px; margin: 40px auto; background: #fff; padding: 32px; border-radius: 12px; }
label { display: block; margin-top: 14px; font-weight: bold; }
input { width: 100%; padding: 8px; margin-top: 4px; box-sizing: border-box; }
button, a.button { margin-top: 20px; padding: 10px 18px; background: #2563eb; color: #fff; border: 0; border-radius: 6px; text-decoration: none; display: inline-block; }
.flash.error { background: #fee2e2; color: #991b1b; padding: 10px; border-radius: 6px; }
.result { font-size: 1.6em; }
img { max-width: 100%; }
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<main>\n{}\n</main>\n</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn welcome() -> String {
    layout(
        "Weather Prediction",
        "<h1>Weather Prediction</h1>\n\
         <p>Enter temperature, humidity and wind speed to see whether the model expects a sunny or a rainy day.</p>\n\
         <a class=\"button\" href=\"/form\">Start</a>",
    )
}

/// The input form, optionally with a flashed error message.
pub fn form(flash: Option<&str>) -> String {
    let flash = flash
        .map(|m| format!("<p class=\"flash error\">{}</p>\n", escape(m)))
        .unwrap_or_default();
    let body = format!(
        "<h1>Enter Weather Details</h1>\n{}\
         <form method=\"post\" action=\"/predict\">\n\
         <label for=\"temperature\">Temperature (°C)</label>\n\
         <input type=\"text\" id=\"temperature\" name=\"temperature\">\n\
         <label for=\"humidity\">Humidity (%)</label>\n\
         <input type=\"text\" id=\"humidity\" name=\"humidity\">\n\
         <label for=\"wind_speed\">Wind Speed (km/h)</label>\n\
         <input type=\"text\" id=\"wind_speed\" name=\"wind_speed\">\n\
         <button type=\"submit\">Predict</button>\n\
         </form>",
        flash
    );
    layout("Weather Prediction Form", &body)
}

pub fn result(r: &PredictionResult) -> String {
    let body = format!(
        "<h1>Prediction Result</h1>\n\
         <p class=\"result\">Predicted weather: <strong>{}</strong></p>\n\
         <p>Confidence: {}</p>\n\
         <ul>\n<li>Sunny: {}</li>\n<li>Rainy: {}</li>\n</ul>\n\
         <img alt=\"Weather Prediction Visualization\" src=\"{}\">\n\
         <p><a class=\"button\" href=\"/form\">Try again</a></p>",
        r.label,
        escape(&r.confidence()),
        escape(&r.sunny()),
        escape(&r.rainy()),
        r.plot.data_url()
    );
    layout("Weather Prediction Result", &body)
}
