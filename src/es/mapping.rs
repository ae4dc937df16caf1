use serde::Serialize;
use serde_json::{json, Map, Value};

pub const EMAIL_ANALYZER: &str = "uax_url_email_analyzer";
pub const EMAIL_TOKENIZER: &str = "uax_url_email_tokenizer";

pub const CUSTOMERS_INDEX: &str = "customers";
pub const COMPANIES_INDEX: &str = "companies";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMapping {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<&'static str>,
}

impl FieldMapping {
    pub const fn keyword() -> Self {
        Self {
            field_type: FieldType::Keyword,
            analyzer: None,
        }
    }

    pub const fn email_text() -> Self {
        Self {
            field_type: FieldType::Text,
            analyzer: Some(EMAIL_ANALYZER),
        }
    }
}

/// Static declaration of one managed index and its field mappings.
#[derive(Debug, Clone)]
pub struct IndexSpec {
    pub name: &'static str,
    pub properties: Vec<(&'static str, FieldMapping)>,
}

impl IndexSpec {
    pub fn customers() -> Self {
        Self::with_email(
            CUSTOMERS_INDEX,
            &[
                "integrationId",
                "scopeBrandIds",
                "ownerId",
                "position",
                "leadStatus",
                "lifecycleState",
                "tagIds",
                "companyIds",
                "mergedIds",
                "status",
            ],
        )
    }

    pub fn companies() -> Self {
        Self::with_email(
            COMPANIES_INDEX,
            &[
                "scopeBrandIds",
                "plan",
                "industry",
                "parentCompanyId",
                "ownerId",
                "leadStatus",
                "lifecycleState",
                "tagIds",
                "mergedIds",
                "status",
                "businessType",
            ],
        )
    }

    /// `primaryEmail` goes through the email analyzer, everything else is a keyword.
    fn with_email(name: &'static str, keywords: &[&'static str]) -> Self {
        let mut properties = Vec::with_capacity(keywords.len() + 1);
        properties.push(("primaryEmail", FieldMapping::email_text()));
        properties.extend(keywords.iter().map(|f| (*f, FieldMapping::keyword())));
        Self { name, properties }
    }

    /// Body for `PUT /{index}/_mapping` holding every declared property.
    pub fn mapping_body(&self) -> Result<Value, serde_json::Error> {
        let mut properties = Map::with_capacity(self.properties.len());
        for (field, mapping) in &self.properties {
            properties.insert((*field).to_string(), serde_json::to_value(mapping)?);
        }
        Ok(json!({ "properties": properties }))
    }
}

/// Indices handled by the bootstrapper, in creation order.
pub fn managed_indices() -> Vec<IndexSpec> {
    vec![IndexSpec::customers(), IndexSpec::companies()]
}

pub fn analysis_settings() -> Value {
    json!({
        "analyzer": {
            EMAIL_ANALYZER: { "tokenizer": EMAIL_TOKENIZER }
        },
        "tokenizer": {
            EMAIL_TOKENIZER: { "type": "uax_url_email" }
        }
    })
}

/// Body for `PUT /{index}`; the same for every managed index.
pub fn create_index_body() -> Value {
    json!({
        "settings": {
            "analysis": analysis_settings()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzer_references_declared_tokenizer() {
        let analysis = analysis_settings();
        assert_eq!(
            analysis["analyzer"]["uax_url_email_analyzer"]["tokenizer"],
            "uax_url_email_tokenizer"
        );
        assert_eq!(
            analysis["tokenizer"]["uax_url_email_tokenizer"]["type"],
            "uax_url_email"
        );
        assert_eq!(create_index_body()["settings"]["analysis"], analysis);
    }

    #[test]
    fn customers_mapping_has_every_field() {
        let body = IndexSpec::customers().mapping_body().unwrap();
        let props = body["properties"].as_object().unwrap();

        assert_eq!(props.len(), 11);
        assert_eq!(
            props["primaryEmail"],
            json!({ "type": "text", "analyzer": "uax_url_email_analyzer" })
        );
        for field in ["integrationId", "position", "companyIds", "status"] {
            assert_eq!(props[field], json!({ "type": "keyword" }), "{field}");
        }
        assert!(!props.contains_key("businessType"));
    }

    #[test]
    fn companies_mapping_has_every_field() {
        let body = IndexSpec::companies().mapping_body().unwrap();
        let props = body["properties"].as_object().unwrap();

        assert_eq!(props.len(), 12);
        for field in ["plan", "industry", "parentCompanyId", "businessType"] {
            assert_eq!(props[field], json!({ "type": "keyword" }), "{field}");
        }
        assert!(!props.contains_key("integrationId"));
    }

    #[test]
    fn managed_indices_order() {
        let names: Vec<_> = managed_indices().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["customers", "companies"]);
    }
}
