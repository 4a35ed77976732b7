//! Self-contained HTML charts of experiment runs.
//!
//! Each function writes a single HTML file with an embedded
//! [Plotly.js](https://plotly.com/javascript/) chart. The library itself is fetched from a CDN
//! when the file is first opened in a browser.
//!
//! | Chart | Function |
//! |---|---|
//! | Best cost per iteration, one line per run | [`plot_cost_history`] |
//! | Objective contour with animated particle positions | [`plot_contour`] |

use core::fmt::Write as _;
use std::path::Path;

use crate::{
    experiments::RunRecord, traits::BatchCostFunction, DMatrix, Error, Float,
};

/// The region shown by contour charts unless told otherwise.
pub const DEFAULT_LIMITS: [(Float, Float); 2] = [(-2.0, 2.0), (-2.0, 2.0)];

/// Delay between animation frames, in milliseconds.
pub const FRAME_INTERVAL_MS: usize = 200;

/// Number of grid points along each axis of a contour.
const GRID_SIZE: usize = 100;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Write a line chart of the best cost at every iteration, one trace per run.
///
/// `legend_title` names what distinguishes the runs (a coefficient name in a sweep, for
/// instance) and may be empty.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn plot_cost_history<T: AsRef<Path>>(
    records: &[RunRecord],
    title: &str,
    legend_title: &str,
    path: T,
) -> Result<(), Error> {
    let mut traces = String::new();
    for record in records {
        let iterations: Vec<usize> = (0..record.history.costs.len()).collect();
        let _ = write!(
            traces,
            r#"  {{ x: {iterations:?}, y: {costs}, mode: "lines", type: "scatter", name: "{name}" }},
"#,
            costs = js_array(&record.history.costs),
            name = escape_js(&record.label),
        );
    }
    let mut html = header(title);
    let _ = write!(
        html,
        r#"<div id="chart" style="height: 600px;"></div>
<script>
Plotly.newPlot("chart", [
{traces}], {{
  title: {{ text: "{title}" }},
  xaxis: {{ title: {{ text: "Iterations" }} }},
  yaxis: {{ title: {{ text: "Cost" }} }},
  legend: {{ title: {{ text: "{legend_title}" }} }}
}}, {{ responsive: true }});
</script>
</body>
</html>
"#,
        title = escape_js(title),
        legend_title = escape_js(legend_title),
    );
    write_html(path.as_ref(), &html)
}

/// Write a contour of `problem` over `limits` with the recorded particle positions of `record`
/// overlaid as an animation, one frame per iteration.
///
/// The objective is shown on a `log10` scale since the Goldstein-Price function spans several
/// orders of magnitude over the usual search square.
///
/// # Errors
///
/// Returns [`Error::MissingHistory`] if `record` holds no particle positions, any error raised
/// while evaluating `problem`, and [`Error::Io`] if the file cannot be written.
pub fn plot_contour<P, E, T>(
    record: &RunRecord,
    problem: &P,
    limits: [(Float, Float); 2],
    path: T,
) -> Result<(), Error>
where
    P: BatchCostFunction<(), E>,
    Error: From<E>,
    T: AsRef<Path>,
{
    if !record.history.has_positions() {
        return Err(Error::MissingHistory(record.label.clone()));
    }
    let xs = linspace(limits[0], GRID_SIZE);
    let ys = linspace(limits[1], GRID_SIZE);
    let grid = DMatrix::from_fn(GRID_SIZE * GRID_SIZE, 2, |row, col| {
        if col == 0 {
            xs[row % GRID_SIZE]
        } else {
            ys[row / GRID_SIZE]
        }
    });
    let values = problem.evaluate_batch(&grid, &())?;
    let z: Vec<String> = values
        .as_slice()
        .chunks(GRID_SIZE)
        .map(|row| js_array(&row.iter().map(|v| v.log10()).collect::<Vec<_>>()))
        .collect();

    let mut frames = String::new();
    for (step, positions) in record.history.positions.iter().enumerate() {
        let (px, py) = split_positions(positions);
        let _ = writeln!(
            frames,
            r#"  {{ name: "{step}", data: [{{ x: {px}, y: {py} }}], traces: [1] }},"#,
        );
    }
    let (px, py) = record
        .history
        .positions
        .first()
        .map(|positions| split_positions(positions))
        .unwrap_or_default();
    let title = escape_js(&record.label);
    let mut html = header(&record.label);
    let _ = write!(
        html,
        r#"<div id="chart" style="height: 700px; width: 700px;"></div>
<script>
Plotly.newPlot("chart", [
  {{ x: {xs}, y: {ys}, z: [{z}], type: "contour", colorscale: "Viridis",
     colorbar: {{ title: {{ text: "log10 f(x, y)" }} }} }},
  {{ x: {px}, y: {py}, mode: "markers", type: "scatter", name: "particles",
     marker: {{ color: "black", size: 5 }} }}
], {{
  title: {{ text: "{title}" }},
  xaxis: {{ range: [{x_min}, {x_max}], title: {{ text: "x" }} }},
  yaxis: {{ range: [{y_min}, {y_max}], title: {{ text: "y" }} }},
  updatemenus: [{{
    type: "buttons", showactive: false,
    buttons: [{{ label: "Play", method: "animate",
      args: [null, {{ frame: {{ duration: {interval}, redraw: false }},
                     transition: {{ duration: 0 }}, fromcurrent: true }}] }}]
  }}]
}}, {{ responsive: true }}).then(function () {{
  Plotly.addFrames("chart", [
{frames}  ]);
}});
</script>
</body>
</html>
"#,
        xs = js_array(&xs),
        ys = js_array(&ys),
        z = z.join(", "),
        x_min = limits[0].0,
        x_max = limits[0].1,
        y_min = limits[1].0,
        y_max = limits[1].1,
        interval = FRAME_INTERVAL_MS,
    );
    write_html(path.as_ref(), &html)
}

fn header(title: &str) -> String {
    let mut html = String::with_capacity(8192);
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
"#,
        title = escape_html(title),
    );
    html
}

fn write_html(path: &Path, html: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn linspace((start, end): (Float, Float), n: usize) -> Vec<Float> {
    if n < 2 {
        return vec![start; n];
    }
    let step = (end - start) / (n - 1) as Float;
    (0..n).map(|i| (i as Float).mul_add(step, start)).collect()
}

fn split_positions(positions: &[[Float; 2]]) -> (String, String) {
    let (xs, ys): (Vec<Float>, Vec<Float>) = positions.iter().map(|[x, y]| (*x, *y)).unzip();
    (js_array(&xs), js_array(&ys))
}

/// Non-finite values become `null`, which Plotly draws as a gap.
fn js_array(values: &[Float]) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|v| {
            if v.is_finite() {
                format!("{v:?}")
            } else {
                "null".to_string()
            }
        })
        .collect();
    format!("[{}]", items.join(","))
}

fn escape_js(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace("</", "<\\/")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
