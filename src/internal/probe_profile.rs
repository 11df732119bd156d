#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use std::error::Error;

use env_logger::Builder;
use log::{LevelFilter, info, warn};
use plotters::prelude::*;
use probing_map::{ProbeStats, ProbingMap};
use rand::{Rng, distr::Alphanumeric, seq::SliceRandom};

const TABLE_SIZE: usize = 100_000;
// Load factors from 0.1 to 0.95 in 10 steps
const NUM_LOAD_FACTORS: usize = 10;
// Share of the stored keys removed before the second measurement
const DELETE_FRACTION: f64 = 0.3;
const KEY_LENGTH: usize = 12;

const SERIES: [&str; 2] = ["After inserts", "After deletes"];

fn initialize_logger() {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Info)
        .filter_module("probing_map", LevelFilter::Info)
        .format_timestamp_millis()
        .parse_default_env();
    // Avoid panicking if the logger was already initialized elsewhere.
    let _ = builder.try_init();
}

fn random_key(rng: &mut impl Rng) -> String {
    (0..KEY_LENGTH).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// Fills a fresh map to `n_keys` entries, then deletes a share of them.
///
/// Returns the probe statistics before and after the deletions.
fn profile(keys: &[String], n_keys: usize) -> Result<(ProbeStats, ProbeStats), Box<dyn Error>> {
    let mut rng = rand::rng();
    let mut map = ProbingMap::with_capacity(TABLE_SIZE)?;

    let mut stored: Vec<usize> = Vec::with_capacity(n_keys);
    for (id, key) in keys.iter().take(n_keys).enumerate() {
        // random keys may repeat, keep the first id
        if map.contains(key) {
            continue;
        }
        map.set(key, id)?;
        stored.push(id);
    }
    let filled = map.probe_stats();

    stored.shuffle(&mut rng);
    let n_delete = (stored.len() as f64 * DELETE_FRACTION) as usize;
    let (deleted, kept) = stored.split_at(n_delete);
    for &id in deleted {
        if map.delete(&keys[id]) != Some(id) {
            return Err(format!("deleting {} did not return its value", keys[id]).into());
        }
    }
    for &id in kept {
        if map.get(&keys[id]) != Some(&id) {
            return Err(format!("{} unreachable after deletions", keys[id]).into());
        }
    }
    let thinned = map.probe_stats();
    map.teardown();

    Ok((filled, thinned))
}

/// Walks the founders scenario through a five-slot map and logs each step
fn founders() -> Result<(), Box<dyn Error>> {
    let mut map = ProbingMap::with_capacity(5)?;
    for (company, founder) in [
        ("Facebook", "Zuckerberg"),
        ("KPCB", "Kleiner"),
        ("Google", "Brin"),
        ("Microsoft", "Gates"),
        ("Snapchat", "Spiegel"),
    ] {
        map.set(company, founder)?;
        info!("{founder} founded {company}: {} items, load {:.2}", map.len(), map.load());
    }
    if let Err(err) = map.set("Twitter", "Dorsey") {
        info!("sixth company rejected: {err}");
    }
    let previous = map.set("Google", "Page")?;
    info!("Page also founded Google (replaced {previous:?}): {} items", map.len());

    for company in ["Facebook", "KPCB", "Google", "Microsoft", "Snapchat", "Google"] {
        let founder = map.delete(company);
        info!(
            "deleted {company} -> {founder:?}: {} items, load {:.2}, still present: {}",
            map.len(),
            map.load(),
            map.contains(company)
        );
    }
    map.teardown();
    Ok(())
}

fn draw_chart(
    file_name: &str,
    caption: &str,
    y_desc: &str,
    x_labels: &[String],
    series: &[Vec<f64>; 2],
) -> Result<(), Box<dyn Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(50, 90, 220),  // Bright blue
        RGBColor(220, 50, 50),  // Bright red
    ];
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    let root = BitMapBackend::new(file_name, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..x_labels.len(), 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_labels(x_labels.len())
        .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
        .x_desc("Load Factor Before Deletes")
        .y_desc(y_desc)
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (series_idx, &name) in SERIES.iter().enumerate() {
        let color = &colors[series_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                series[series_idx].iter().enumerate().map(|(i, &y)| (i, y)),
                line_style,
            ))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            series[series_idx]
                .iter()
                .enumerate()
                .map(|(i, &y)| Circle::new((i, y), marker_size, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    initialize_logger();
    founders()?;

    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();
    info!("Load factors: {load_factors:?}");

    // Generate random keys outside the loop to ensure fair comparison
    let mut rng = rand::rng();
    let max_keys_needed = num_keys.iter().copied().max().unwrap_or(0);
    let keys: Vec<String> = (0..max_keys_needed).map(|_| random_key(&mut rng)).collect();

    let mut mean_probes: [Vec<f64>; 2] = [Vec::new(), Vec::new()];
    let mut worst_probes: [Vec<f64>; 2] = [Vec::new(), Vec::new()];

    for &n_keys in &num_keys {
        let (filled, thinned) = profile(&keys, n_keys)?;
        info!("{n_keys} keys: {filled} | after deletes: {thinned}");
        if thinned.max_probe_length > filled.max_probe_length {
            warn!("worst probe grew after deletes at {n_keys} keys");
        }

        for (idx, stats) in [filled, thinned].into_iter().enumerate() {
            mean_probes[idx].push(stats.mean_probe_length);
            worst_probes[idx].push(stats.max_probe_length as f64);
        }
    }

    let x_labels: Vec<String> = load_factors.iter().map(|load| format!("{load:.2}")).collect();
    draw_chart(
        "mean_probe_length.png",
        "Mean Probe Length of a Fixed-Capacity Linear Probing Map",
        "Mean Probe Length (slots)",
        &x_labels,
        &mean_probes,
    )?;
    draw_chart(
        "worst_probe_length.png",
        "Worst-Case Probe Length of a Fixed-Capacity Linear Probing Map",
        "Worst Probe Length (slots)",
        &x_labels,
        &worst_probes,
    )?;

    info!("Generated plot images: mean_probe_length.png, worst_probe_length.png");
    Ok(())
}
