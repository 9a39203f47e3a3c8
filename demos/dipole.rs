use coulomb_field::plot::FieldPlot;

fn main() {
    // Same inputs a form would submit: one "x y q" per line.
    let charges = "-2 0 1\n2 0 -1";

    let plot = match FieldPlot::from_text(charges, "-10", "10", "200", 1.5) {
        Ok(plot) => plot,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    println!("max |E| = {:.6e}", plot.field.max_magnitude());
    println!("streamlines: {}", plot.streamlines.len());
    println!("line, points, length");
    for (i, line) in plot.streamlines.iter().enumerate() {
        println!("{i}, {}, {:.4}", line.len(), line.length());
    }
    for (marker, label) in plot.legend_entries() {
        println!("{label} at ({:.2}, {:.2})", marker.position.x, marker.position.y);
    }
}
