use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Plotly figure exactly as the plot service produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub layout: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PlotResponse {
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PlotSpec {
    /// The service double-encodes: `plot` is a JSON document inside a string.
    pub fn from_encoded(encoded: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(encoded)
    }

    /// Script handing the figure to Plotly inside the webview. It throws when
    /// Plotly has not loaded so the caller sees the failure.
    pub fn render_script(&self, element_id: &str) -> Result<String, serde_json::Error> {
        let data = serde_json::to_string(&self.data)?;
        let layout = if self.layout.is_null() {
            "{}".to_string()
        } else {
            serde_json::to_string(&self.layout)?
        };
        let target = serde_json::to_string(element_id)?;
        Ok(format!(
            "if (!window.Plotly) {{ throw new Error(\"Plotly is not loaded\"); }} \
             await window.Plotly.newPlot({target}, {data}, {layout}); return true;"
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_nested_plot_document() {
        let response: PlotResponse = serde_json::from_value(json!({
            "plot": "{\"data\": [{\"x\": [1, 2], \"type\": \"bar\"}], \"layout\": {\"title\": \"T\"}}"
        }))
        .expect("response should deserialize");

        let spec = PlotSpec::from_encoded(response.plot.as_deref().unwrap_or_default())
            .expect("plot should decode");
        assert_eq!(spec.data[0]["type"], "bar");
        assert_eq!(spec.layout["title"], "T");
    }

    #[test]
    fn render_script_throws_without_plotly_and_defaults_layout() {
        let spec = PlotSpec {
            data: json!([{"y": [3]}]),
            layout: Value::Null,
        };

        let script = spec.render_script("plot-area").expect("script renders");
        assert_eq!(
            script,
            "if (!window.Plotly) { throw new Error(\"Plotly is not loaded\"); } \
             await window.Plotly.newPlot(\"plot-area\", [{\"y\":[3]}], {}); return true;"
        );
    }
}
