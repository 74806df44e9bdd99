use crate::errors::AppError;
use crate::models::TextBox;

/// Converts a meme-text list into the captioning API's box list: one box
/// per element, box index = position in the input. The API enforces its
/// own upper bound on box count, so none is applied here.
pub fn boxes_from_texts(meme_texts: &[String]) -> Result<Vec<TextBox>, AppError> {
    if meme_texts.is_empty() {
        return Err(AppError::Validation(
            "memeTexts must contain at least one entry".to_string(),
        ));
    }

    Ok(meme_texts
        .iter()
        .map(|text| TextBox { text: text.clone() })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn one_box_per_text_in_order() {
        let texts = vec!["top".to_string(), "middle".to_string(), "bottom".to_string()];
        let boxes = boxes_from_texts(&texts).unwrap();
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0].text, "top");
        assert_eq!(boxes[1].text, "middle");
        assert_eq!(boxes[2].text, "bottom");
    }

    #[test]
    fn single_text_yields_single_box() {
        let boxes = boxes_from_texts(&["only".to_string()]).unwrap();
        assert_eq!(boxes, vec![TextBox { text: "only".to_string() }]);
    }

    #[test]
    fn empty_texts_fail_validation() {
        let err = boxes_from_texts(&[]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
