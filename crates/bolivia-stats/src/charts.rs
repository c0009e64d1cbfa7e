use serde::Serialize;

/// Direction of the category axis for bar charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarOrientation {
    Vertical,
    Horizontal,
}

/// How multiple bar series share a category slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    Grouped,
    Stacked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ChartKind {
    Bar {
        orientation: BarOrientation,
        mode: BarMode,
    },
    Pie,
    Line,
    Scatter,
}

/// One named series over the shared category axis.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", untagged)]
pub enum ChartData {
    Categorical {
        categories: Vec<String>,
        series: Vec<Series>,
    },
    Points {
        points: Vec<ScatterPoint>,
    },
}

/// A renderer-agnostic chart description. The service returns these as JSON;
/// nothing in this crate draws them.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_title: Option<String>,
    pub data: ChartData,
}

impl ChartSpec {
    pub fn categorical(
        title: impl Into<String>,
        kind: ChartKind,
        categories: Vec<String>,
        series: Vec<Series>,
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            x_title: None,
            y_title: None,
            data: ChartData::Categorical { categories, series },
        }
    }

    pub fn scatter(title: impl Into<String>, points: Vec<ScatterPoint>) -> Self {
        Self {
            title: title.into(),
            kind: ChartKind::Scatter,
            x_title: None,
            y_title: None,
            data: ChartData::Points { points },
        }
    }

    pub fn with_axis_titles(
        mut self,
        x_title: impl Into<String>,
        y_title: impl Into<String>,
    ) -> Self {
        self.x_title = Some(x_title.into());
        self.y_title = Some(y_title.into());
        self
    }

    /// Category count for categorical charts, point count for scatters.
    pub fn len(&self) -> usize {
        match &self.data {
            ChartData::Categorical { categories, .. } => categories.len(),
            ChartData::Points { points } => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorical_chart_reports_category_count() {
        let chart = ChartSpec::categorical(
            "Población por Departamento",
            ChartKind::Bar {
                orientation: BarOrientation::Horizontal,
                mode: BarMode::Grouped,
            },
            vec!["Santa Cruz".to_string(), "La Paz".to_string()],
            vec![Series::new("2024", vec![3_115_386.0, 3_022_566.0])],
        );
        assert_eq!(chart.len(), 2);
        assert!(!chart.is_empty());
    }

    #[test]
    fn scatter_serializes_points_without_null_size() {
        let chart = ChartSpec::scatter(
            "Alfabetización vs Universitaria",
            vec![ScatterPoint {
                label: "Tarija".to_string(),
                x: 95.1,
                y: 17.2,
                size: None,
            }],
        );
        let json = serde_json::to_value(&chart).expect("serializes");
        assert_eq!(json["data"]["points"][0]["label"], "Tarija");
        assert!(json["data"]["points"][0].get("size").is_none());
    }
}
