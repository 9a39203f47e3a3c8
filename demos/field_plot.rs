use anyhow::{Context, Result};
use coulomb_field::config::PlotConfig;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("usage: field_plot <config.toml>")?;
    let config = PlotConfig::from_file(&path).with_context(|| format!("loading {path}"))?;
    let plot = config.build_plot()?;

    println!(
        "{} charge(s), {} streamline(s), max |E| = {:.4e}",
        config.charges.len(),
        plot.streamlines.len(),
        plot.field.max_magnitude()
    );

    #[cfg(feature = "plot")]
    {
        use coulomb_field::render::{render_svg, PlotStyle};
        let style = PlotStyle::default().with_size(config.output.width, config.output.height);
        render_svg(&plot, &config.output.path, &style)?;
        println!("wrote {}", config.output.path.display());
    }

    Ok(())
}
