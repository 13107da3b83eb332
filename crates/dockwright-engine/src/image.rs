use serde::{Deserialize, Serialize};

/// Image metadata as reported by `<engine> inspect`.
///
/// The well-known fields are typed; everything else the engine reports is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageDetails {
    pub id: String,
    #[serde(default)]
    pub repo_tags: Option<Vec<String>>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ImageDetails {
    /// Parse `inspect` output (a JSON array) and return its first entry.
    ///
    /// `Ok(None)` when the array is empty.
    pub fn from_inspect_output(raw: &str) -> Result<Option<Self>, serde_json::Error> {
        let images: Vec<Self> = serde_json::from_str(raw)?;
        Ok(images.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_unknown_fields() {
        let raw = r#"[{"Id":"sha256:abc","Config":{"Cmd":["/hello"]}}]"#;
        let details = ImageDetails::from_inspect_output(raw).unwrap().unwrap();

        assert_eq!(details.id, "sha256:abc");
        assert!(details.repo_tags.is_none());
        assert_eq!(details.extra["Config"]["Cmd"][0], "/hello");
    }

    #[test]
    fn null_repo_tags_are_accepted() {
        let raw = r#"[{"Id":"sha256:abc","RepoTags":null}]"#;
        let details = ImageDetails::from_inspect_output(raw).unwrap().unwrap();
        assert!(details.repo_tags.is_none());
    }
}
