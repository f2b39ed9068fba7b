//! Subcommand implementations. Each returns the text to print on stdout.

use crate::CliResult;
use crate::cli::Commands;
use crate::stroke::StrokeFile;
use sketchsnap_core::{
    EngineConfig, StrokeSession, recognize_with, simplify_indices, smooth, to_bez_path,
};

pub fn run(command: &Commands, config: &EngineConfig) -> CliResult<String> {
    match command {
        Commands::Recognize { stroke } => recognize(&StrokeFile::load(stroke)?, config),
        Commands::Simplify { stroke, epsilon } => {
            let epsilon = epsilon.unwrap_or(config.simplify_epsilon);
            simplify(&StrokeFile::load(stroke)?, epsilon)
        }
        Commands::Smooth { stroke, tension, svg } => {
            let tension = tension.unwrap_or(config.render_tension);
            smooth_stroke(&StrokeFile::load(stroke)?, tension, *svg)
        }
        Commands::Replay { stroke } => replay(&StrokeFile::load(stroke)?, config),
    }
}

fn recognize(stroke: &StrokeFile, config: &EngineConfig) -> CliResult<String> {
    let shape = recognize_with(&stroke.points, &config.thresholds);
    Ok(serde_json::to_string_pretty(&shape)?)
}

fn simplify(stroke: &StrokeFile, epsilon: f64) -> CliResult<String> {
    let kept = simplify_indices(&stroke.points, epsilon);
    log::info!("Kept {} of {} points", kept.len(), stroke.points.len());

    let simplified = StrokeFile {
        points: kept.iter().map(|&i| stroke.points[i]).collect(),
        pressures: if stroke.pressures.is_empty() {
            Vec::new()
        } else {
            kept.iter().map(|&i| stroke.pressure(i)).collect()
        },
    };
    Ok(serde_json::to_string_pretty(&simplified)?)
}

fn smooth_stroke(stroke: &StrokeFile, tension: f64, svg: bool) -> CliResult<String> {
    let curve = smooth(&stroke.points, tension);
    if svg {
        Ok(to_bez_path(&curve).to_svg())
    } else {
        Ok(serde_json::to_string_pretty(&curve)?)
    }
}

fn replay(stroke: &StrokeFile, config: &EngineConfig) -> CliResult<String> {
    let Some(&first) = stroke.points.first() else {
        return Ok(serde_json::to_string_pretty(&None::<()>)?);
    };
    let mut session = StrokeSession::new(config.clone());
    session.begin(first, stroke.pressure(0));

    let mut previewed = None;
    for (i, &point) in stroke.points.iter().enumerate().skip(1) {
        let preview = session.add_point(point, stroke.pressure(i)).map(|s| s.shape_type());
        if preview != previewed {
            log::info!("Preview after {} samples: {:?}", i + 1, preview);
            previewed = preview;
        }
    }

    let committed = session.end();
    if committed.is_none() {
        log::warn!("Stroke was too short to commit");
    }
    Ok(serde_json::to_string_pretty(&committed)?)
}
