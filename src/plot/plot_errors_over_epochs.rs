use crate::prelude::*;
use plotters::prelude::*;

/// Renders the per-example and recent average error of a training run on a
/// log scale.
pub fn plot_errors_over_epochs(history: &[ErrorSample], filename: &str) -> Result<()> {
    draw(history, filename).map_err(|e| NNError::PlotError(e.to_string()))
}

fn draw(history: &[ErrorSample], filename: &str) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let epochs = history.len();

    // Clamp to avoid log of zero
    let to_log = |e: f64| if e <= 0.0 { 1e-10f64.log10() } else { e.log10() };
    let current: Vec<f64> = history.iter().map(|s| to_log(s.current_error)).collect();
    let average: Vec<f64> = history.iter().map(|s| to_log(s.recent_average_error)).collect();

    // Find min and max log error values
    let y_min = current
        .iter()
        .chain(&average)
        .cloned()
        .fold(f64::INFINITY, f64::min)
        .floor()
        .min(-1.0);
    let y_max = current
        .iter()
        .chain(&average)
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max)
        .ceil()
        .max(y_min + 1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption("Training Error (Log Scale)", ("sans-serif", 30).into_font())
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..epochs.max(1), y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Iteration")
        .y_desc("Error (Log Scale)")
        .y_label_formatter(&|y| format!("1e{:.0}", y))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            current.iter().enumerate().map(|(i, &e)| (i + 1, e)),
            &BLUE.mix(0.4),
        ))?
        .label("RMS error")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE.mix(0.4)));

    chart
        .draw_series(LineSeries::new(
            average.iter().enumerate().map(|(i, &e)| (i + 1, e)),
            &RED,
        ))?
        .label("Recent average error")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    // Draw the legend
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
