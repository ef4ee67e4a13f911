use std::collections::BTreeMap;

use super::color::{self, ColorMap};
use super::labels::{capitalize, format_label};
use super::render::{Legend, LegendPosition, LineSeries, RegressionOverlay, Renderer, ScatterSeries};
use super::spec::{Alpha, ChartSpec};
use crate::data::model::{Dataset, Value};
use crate::error::AnalysisError;
use crate::stats::describe::mean;
use crate::stats::linear_fit;

pub const SCATTER_TITLE: &str = "Scatter Plot of Shooting Performance";

// ---------------------------------------------------------------------------
// Scatter comparison
// ---------------------------------------------------------------------------

/// Plot `y` against `x` as points, labelled with the raw column names.
pub fn render_scatter(
    dataset: &Dataset,
    x: &str,
    y: &str,
    renderer: &mut dyn Renderer,
) -> Result<(), AnalysisError> {
    let points = complete_points(dataset, x, y)?;
    log::debug!("scatter '{x}' vs '{y}': {} points", points.len());

    renderer.scatter(ScatterSeries {
        name: None,
        points,
        color: color::PRIMARY,
        alpha: Alpha::OPAQUE,
    });
    renderer.x_label(x);
    renderer.y_label(y);
    renderer.title(SCATTER_TITLE);
    renderer.grid(true);
    renderer.show()
}

// ---------------------------------------------------------------------------
// Trend line
// ---------------------------------------------------------------------------

/// Connected line of `y` over `x` with the least-squares fit overlaid.
///
/// The line visits x in ascending order, averaging y where x repeats.
pub fn render_trend(
    dataset: &Dataset,
    x: &str,
    y: &str,
    renderer: &mut dyn Renderer,
) -> Result<(), AnalysisError> {
    let points = complete_points(dataset, x, y)?;
    let line = mean_by_x(&points);
    let fit = linear_fit(&points);
    let x_range = match (line.first(), line.last()) {
        (Some(lo), Some(hi)) => Some([lo[0], hi[0]]),
        _ => None,
    };
    log::debug!("trend '{x}' vs '{y}': {} points, fit {fit:?}", points.len());

    renderer.line(LineSeries {
        name: None,
        points: line,
        color: color::PRIMARY,
    });
    renderer.regression(RegressionOverlay {
        points,
        point_color: color::SECONDARY,
        point_alpha: Alpha::TREND_POINTS,
        fit,
        x_range,
        line_color: color::ACCENT,
    });

    let x_label = format_label(x);
    let y_label = format_label(y);
    renderer.x_label(&x_label);
    renderer.y_label(&y_label);
    renderer.title(&format!("Line Plot of {x_label} vs. {y_label}"));
    renderer.grid(true);
    renderer.show()
}

fn mean_by_x(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a[0].total_cmp(&b[0]));
    sorted
        .chunk_by(|a, b| a[0] == b[0])
        .map(|run| {
            let ys: Vec<f64> = run.iter().map(|p| p[1]).collect();
            [run[0][0], mean(&ys)]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Shot distribution
// ---------------------------------------------------------------------------

/// Points on the court coloured by the hue column, one series per category.
///
/// Without a hue column every point lands in one unnamed series and no
/// legend is drawn. Rows whose hue value is missing are skipped.
pub fn render_shot_distribution(
    dataset: &Dataset,
    spec: &ChartSpec,
    renderer: &mut dyn Renderer,
) -> Result<(), AnalysisError> {
    let xs = dataset.numeric_values(&spec.x)?;
    let ys = dataset.numeric_values(&spec.y)?;

    let series: Vec<ScatterSeries> = match &spec.hue {
        Some(hue) => {
            let column = dataset.column(hue)?;
            let mut categories = dataset.unique_values(hue)?;
            categories.retain(|v| !v.is_missing());
            let color_map = ColorMap::new(&categories, spec.palette);

            let mut groups: BTreeMap<&Value, Vec<[f64; 2]>> = BTreeMap::new();
            for ((x, y), h) in xs.iter().zip(&ys).zip(&column.values) {
                if let (Some(x), Some(y), false) = (x, y, h.is_missing()) {
                    groups.entry(h).or_default().push([*x, *y]);
                }
            }
            log::debug!(
                "shot chart '{}' vs '{}' by '{hue}': {} categories",
                spec.x,
                spec.y,
                color_map.len()
            );

            groups
                .into_iter()
                .map(|(value, points)| ScatterSeries {
                    name: Some(value.to_string()),
                    points,
                    color: color_map.color_for(value),
                    alpha: spec.alpha,
                })
                .collect()
        }
        None => vec![ScatterSeries {
            name: None,
            points: pair_up(&xs, &ys),
            color: color::palette_colors(spec.palette, 1)[0],
            alpha: spec.alpha,
        }],
    };

    for s in series {
        renderer.scatter(s);
    }
    renderer.title(&format!("Shot Chart: {} vs {}", spec.x, spec.y));
    renderer.x_label(&capitalize(&spec.x));
    renderer.y_label(&capitalize(&spec.y));
    if let Some(hue) = &spec.hue {
        renderer.legend(Legend {
            title: capitalize(hue),
            position: LegendPosition::UpperRight,
        });
    }
    renderer.grid(true);
    renderer.show()
}

// -- helpers --

/// Rows where both `x` and `y` are present, in row order.
fn complete_points(dataset: &Dataset, x: &str, y: &str) -> Result<Vec<[f64; 2]>, AnalysisError> {
    let xs = dataset.numeric_values(x)?;
    let ys = dataset.numeric_values(y)?;
    Ok(pair_up(&xs, &ys))
}

fn pair_up(xs: &[Option<f64>], ys: &[Option<f64>]) -> Vec<[f64; 2]> {
    xs.iter()
        .zip(ys)
        .filter_map(|(x, y)| Some([(*x)?, (*y)?]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::figure::Recorder;
    use crate::chart::spec::Palette;
    use crate::data::model::Column;

    fn court() -> Dataset {
        Dataset::from_columns(vec![
            Column::new("Shots_Made", [10, 8, 15, 9, 5, 7, 20, 27].map(Value::from).to_vec()),
            Column::new(
                "Shots_Attempted",
                [15, 10, 20, 12, 7, 15, 25, 30].map(Value::from).to_vec(),
            ),
            Column::new(
                "Location_X",
                [0.2, 0.3, 0.4, 0.5, 0.7, 0.6, 0.8, 0.1].map(Value::from).to_vec(),
            ),
            Column::new(
                "Location_Y",
                [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8].map(Value::from).to_vec(),
            ),
            Column::new(
                "Result",
                ["made", "missed", "made", "made", "missed", "made", "made", "missed"]
                    .map(Value::from)
                    .to_vec(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn scatter_uses_raw_names() {
        let mut rec = Recorder::new();
        render_scatter(&court(), "Shots_Made", "Shots_Attempted", &mut rec).unwrap();

        let fig = rec.last().unwrap();
        assert_eq!(rec.shown().len(), 1);
        assert_eq!(fig.title.as_deref(), Some(SCATTER_TITLE));
        assert_eq!(fig.x_label.as_deref(), Some("Shots_Made"));
        assert_eq!(fig.y_label.as_deref(), Some("Shots_Attempted"));
        assert!(fig.grid);
        assert_eq!(fig.point_count(), 8);
        assert!(fig.legend.is_none());
    }

    #[test]
    fn trend_formats_labels_and_fits_a_line() {
        let mut rec = Recorder::new();
        render_trend(&court(), "Shots_Made", "Shots_Attempted", &mut rec).unwrap();

        let fig = rec.last().unwrap();
        assert_eq!(fig.x_label.as_deref(), Some("Shots made"));
        assert_eq!(fig.y_label.as_deref(), Some("Shots attempted"));
        assert_eq!(
            fig.title.as_deref(),
            Some("Line Plot of Shots made vs. Shots attempted")
        );
        assert!(fig.grid);

        let line = fig.line_series().next().unwrap();
        let xs: Vec<f64> = line.points.iter().map(|p| p[0]).collect();
        assert_eq!(xs, vec![5.0, 7.0, 8.0, 9.0, 10.0, 15.0, 20.0, 27.0]);

        let reg = fig.regressions().next().unwrap();
        assert_eq!(reg.point_alpha.get(), 0.5);
        assert_eq!(reg.line_color, crate::chart::color::ACCENT);
        assert!(reg.fit.unwrap().slope > 0.0);
        let seg = reg.fit_segment().unwrap();
        assert_eq!(seg[0][0], 5.0);
        assert_eq!(seg[1][0], 27.0);
    }

    #[test]
    fn trend_averages_repeated_x() {
        assert_eq!(
            mean_by_x(&[[2.0, 4.0], [1.0, 1.0], [2.0, 6.0]]),
            vec![[1.0, 1.0], [2.0, 5.0]]
        );
    }

    #[test]
    fn shot_chart_groups_by_hue() {
        let spec = ChartSpec::new("Location_X", "Location_Y")
            .hue("Result")
            .palette(Palette::Bright)
            .alpha(Alpha::new(0.7).unwrap());
        let mut rec = Recorder::new();
        render_shot_distribution(&court(), &spec, &mut rec).unwrap();

        let fig = rec.last().unwrap();
        assert_eq!(fig.title.as_deref(), Some("Shot Chart: Location_X vs Location_Y"));
        assert_eq!(fig.x_label.as_deref(), Some("Location_x"));
        assert_eq!(fig.y_label.as_deref(), Some("Location_y"));
        let legend = fig.legend.as_ref().unwrap();
        assert_eq!(legend.title, "Result");
        assert_eq!(legend.position, LegendPosition::UpperRight);

        let names: Vec<_> = fig.scatter_series().map(|s| s.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["made", "missed"]);
        let bright = color::palette_colors(Palette::Bright, 2);
        let colors: Vec<_> = fig.scatter_series().map(|s| s.color).collect();
        assert_eq!(colors, bright);
        assert!(fig.scatter_series().all(|s| s.alpha.get() == 0.7));
        assert_eq!(fig.point_count(), 8);
    }

    #[test]
    fn shot_chart_accepts_high_cardinality_numeric_hue() {
        let spec = ChartSpec::shot_chart("Location_X", "Location_Y", "Shots_Made", "bright", 0.7)
            .unwrap();
        let mut rec = Recorder::new();
        render_shot_distribution(&court(), &spec, &mut rec).unwrap();

        let fig = rec.last().unwrap();
        assert_eq!(fig.scatter_series().count(), 8);
        assert_eq!(fig.legend.as_ref().unwrap().title, "Shots_made");
    }

    #[test]
    fn shot_chart_rejects_text_coordinates() {
        let mut rec = Recorder::new();
        for spec in [
            ChartSpec::new("Result", "Location_Y").hue("Shots_Made"),
            ChartSpec::new("Location_X", "Result"),
        ] {
            let err = render_shot_distribution(&court(), &spec, &mut rec).unwrap_err();
            assert_eq!(
                err,
                AnalysisError::TypeMismatch {
                    column: "Result".into(),
                    expected: crate::data::ColumnKind::Numeric,
                    found: "text",
                }
            );
        }
        assert!(rec.shown().is_empty());
        assert!(rec.pending().is_empty());
    }

    #[test]
    fn shot_chart_without_hue_has_no_legend() {
        let spec = ChartSpec::new("Location_X", "Location_Y");
        let mut rec = Recorder::new();
        render_shot_distribution(&court(), &spec, &mut rec).unwrap();

        let fig = rec.last().unwrap();
        assert!(fig.legend.is_none());
        assert_eq!(fig.scatter_series().count(), 1);
    }

    #[test]
    fn missing_rows_are_skipped() {
        let df = Dataset::from_columns(vec![
            Column::new("x", vec![1.into(), Value::Null, 3.into()]),
            Column::new("y", vec![1.into(), 2.into(), 3.into()]),
            Column::new("h", vec!["a".into(), "b".into(), Value::Null]),
        ])
        .unwrap();
        let mut rec = Recorder::new();
        render_scatter(&df, "x", "y", &mut rec).unwrap();
        assert_eq!(rec.last().unwrap().point_count(), 2);

        let spec = ChartSpec::new("x", "y").hue("h");
        render_shot_distribution(&df, &spec, &mut rec).unwrap();
        assert_eq!(rec.last().unwrap().point_count(), 1);
    }

    #[test]
    fn unknown_column_fails_before_drawing() {
        let mut rec = Recorder::new();
        let err = render_scatter(&court(), "Shots_Made", "Dunks", &mut rec).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ColumnNotFound {
                column: "Dunks".into()
            }
        );

        let spec = ChartSpec::new("Location_X", "Location_Y").hue("Zone");
        assert!(render_shot_distribution(&court(), &spec, &mut rec).is_err());
        assert!(rec.shown().is_empty());
        assert!(rec.pending().is_empty());
    }

    #[test]
    fn text_axis_is_a_type_mismatch() {
        let mut rec = Recorder::new();
        assert!(matches!(
            render_trend(&court(), "Result", "Shots_Made", &mut rec),
            Err(AnalysisError::TypeMismatch { .. })
        ));
    }
}
