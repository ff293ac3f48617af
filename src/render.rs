use crate::classifier::Prediction;

pub const POSITIVE_CAPTION: &str = "Level of";
pub const NEGATIVE_CAPTION: &str = "Confidence Level";

/// What the result rows should show for a prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub positive: bool,
    /// The detected label, or "Negative" for out-of-category classes.
    pub class_text: String,
    /// Negative verdicts name the category and the class the model actually
    /// returned.
    pub note: Option<String>,
    pub confidence_caption: &'static str,
    pub confidence_text: String,
}

/// Confidence as a display percentage: rounded to four decimal places first,
/// so `0.9321` comes out as exactly `93.21` with no floating artifacts.
pub fn confidence_percent(confidence: f64) -> f64 {
    (confidence * 10_000.0).round() / 100.0
}

/// Pure projection of a prediction into display strings. Classes in the
/// positive-label set are a detection; everything else is out of category.
pub fn project(prediction: &Prediction, positive_labels: &[String], category: &str) -> Verdict {
    let positive = positive_labels.iter().any(|label| label == &prediction.class);
    let confidence_text = format!("{}%", confidence_percent(prediction.confidence));

    if positive {
        Verdict {
            positive: true,
            class_text: prediction.class.clone(),
            note: None,
            confidence_caption: POSITIVE_CAPTION,
            confidence_text,
        }
    } else {
        Verdict {
            positive: false,
            class_text: "Negative".to_string(),
            note: Some(format!(
                "{} is outside the {category} category",
                prediction.class
            )),
            confidence_caption: NEGATIVE_CAPTION,
            confidence_text,
        }
    }
}
