use base64::{engine::general_purpose::STANDARD, Engine as _};
use plotters::prelude::*;

use crate::dataset::WeatherSample;
use crate::error::PlotError;
use crate::labels::Weather;

const SIZE: (u32, u32) = (600, 500);
const SUNNY: RGBColor = RGBColor(255, 165, 0);
const RAINY: RGBColor = RGBColor(0, 0, 255);
const INPUT: RGBColor = RGBColor(0, 255, 0);

/// Reference points drawn per chart. Larger sets are thinned by a fixed stride.
pub const MAX_PLOT_POINTS: usize = 1000;

/// A rendered chart ready to drop into a `data:` URL.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedPlot {
    pub mime: &'static str,
    pub base64: String,
}

impl EncodedPlot {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError(e.to_string())
}

fn thinned(reference: &[WeatherSample]) -> impl Iterator<Item = &WeatherSample> {
    let stride = ((reference.len() + MAX_PLOT_POINTS - 1) / MAX_PLOT_POINTS).max(1);
    reference.iter().step_by(stride)
}

/// Five-pointed star around the origin in pixel offsets, first tip up.
fn star(outer: f64, inner: f64) -> Vec<(i32, i32)> {
    use std::f64::consts::{FRAC_PI_2, PI};
    (0..10)
        .map(|k| {
            let r = if k % 2 == 0 { outer } else { inner };
            let angle = PI * k as f64 / 5.0 - FRAC_PI_2;
            ((r * angle.cos()).round() as i32, (r * angle.sin()).round() as i32)
        })
        .collect()
}

/// Humidity vs wind speed for the reference data, split by class, with the
/// request point on top. Output is SVG text.
pub fn render_svg(reference: &[WeatherSample], humidity: f64, wind_speed: f64) -> Result<String, PlotError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let (x_max, y_max) = reference
            .iter()
            .map(|s| (s.humidity, s.wind_speed))
            .chain(std::iter::once((humidity, wind_speed)))
            .fold((100.0_f64, 30.0_f64), |(x, y), (h, w)| (x.max(h), y.max(w)));
        let x_min = reference.iter().map(|s| s.humidity).fold(humidity.min(0.0), f64::min);

        let mut chart = ChartBuilder::on(&root)
            .caption("Weather Prediction Visualization", ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max + 2.0, 0.0..y_max + 2.0)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Humidity (%)")
            .y_desc("Wind Speed (km/h)")
            .draw()
            .map_err(render_err)?;

        for (weather, color) in [(Weather::Sunny, SUNNY), (Weather::Rainy, RAINY)] {
            chart
                .draw_series(
                    thinned(reference)
                        .filter(|s| s.weather == weather)
                        .map(|s| Circle::new((s.humidity, s.wind_speed), 3, color.filled())),
                )
                .map_err(render_err)?
                .label(weather.as_str())
                .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
        }

        let glyph = star(12.0, 5.0);
        let mut outline = glyph.clone();
        outline.push(glyph[0]);
        chart
            .draw_series(std::iter::once(
                EmptyElement::at((humidity, wind_speed)) + Polygon::new(glyph, INPUT.filled()),
            ))
            .map_err(render_err)?
            .label("Your Input")
            .legend(|(x, y)| EmptyElement::at((x, y)) + Polygon::new(star(7.0, 3.0), INPUT.filled()));
        chart
            .draw_series(std::iter::once(
                EmptyElement::at((humidity, wind_speed)) + PathElement::new(outline, BLACK.stroke_width(2)),
            ))
            .map_err(render_err)?;

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.85))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

pub fn render_comparison(reference: &[WeatherSample], humidity: f64, wind_speed: f64) -> Result<EncodedPlot, PlotError> {
    let svg = render_svg(reference, humidity, wind_speed)?;
    Ok(EncodedPlot {
        mime: "image/svg+xml",
        base64: STANDARD.encode(svg.as_bytes()),
    })
}
