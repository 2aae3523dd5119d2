//! Response-schema validation for model output
//!
//! Model responses are untyped JSON; nothing crosses into the canonical
//! document model until the required fields have been checked here.
//! `counterparties` is the one optional section and defaults to empty.

use serde_json::Value;
use shared_types::{AnalysisResult, ComparisonResult};
use tracing::warn;

use crate::GatewayError;

const SEVERITIES: [&str; 3] = ["High", "Medium", "Low"];

/// Parse and validate an analysis response.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, GatewayError> {
    let value = parse_json(raw)?;
    validate_analysis(&value)?;
    serde_json::from_value(value).map_err(|e| GatewayError::Schema(e.to_string()))
}

/// Parse and validate a comparison response.
pub fn parse_comparison(raw: &str) -> Result<ComparisonResult, GatewayError> {
    let value = parse_json(raw)?;
    validate_comparison(&value)?;
    serde_json::from_value(value).map_err(|e| GatewayError::Schema(e.to_string()))
}

fn parse_json(raw: &str) -> Result<Value, GatewayError> {
    serde_json::from_str(raw.trim()).map_err(|e| {
        warn!("model returned non-JSON payload: {e}");
        GatewayError::Schema(format!("response is not valid JSON: {e}"))
    })
}

fn validate_analysis(value: &Value) -> Result<(), GatewayError> {
    let obj = require_object(value, "analysis")?;
    require_string(obj, "summary", "analysis")?;

    for clause in require_array(obj, "keyClauses", "analysis")? {
        let clause = require_object(clause, "keyClauses item")?;
        require_string(clause, "clauseTitle", "keyClauses item")?;
        require_string(clause, "explanation", "keyClauses item")?;
        require_string(clause, "originalTextSnippet", "keyClauses item")?;
    }

    for risk in require_array(obj, "potentialRisks", "analysis")? {
        let risk = require_object(risk, "potentialRisks item")?;
        require_string(risk, "riskTitle", "potentialRisks item")?;
        require_string(risk, "riskDescription", "potentialRisks item")?;
        let severity = require_string(risk, "severity", "potentialRisks item")?;
        if !SEVERITIES.contains(&severity) {
            return Err(GatewayError::Schema(format!(
                "severity must be one of High/Medium/Low, got {severity:?}"
            )));
        }
    }

    for key_date in require_array(obj, "keyDates", "analysis")? {
        let key_date = require_object(key_date, "keyDates item")?;
        require_string(key_date, "eventName", "keyDates item")?;
        require_string(key_date, "date", "keyDates item")?;
        require_string(key_date, "originalTextSnippet", "keyDates item")?;
    }

    // Optional; when present it must be an array of strings.
    if let Some(parties) = obj.get("counterparties") {
        let parties = parties.as_array().ok_or_else(|| {
            GatewayError::Schema("counterparties must be an array".to_string())
        })?;
        if parties.iter().any(|p| !p.is_string()) {
            return Err(GatewayError::Schema(
                "counterparties must contain only strings".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_comparison(value: &Value) -> Result<(), GatewayError> {
    let obj = require_object(value, "comparison")?;
    require_string(obj, "overallSummary", "comparison")?;

    for clause in require_array(obj, "clauseComparisons", "comparison")? {
        let clause = require_object(clause, "clauseComparisons item")?;
        require_string(clause, "clauseTitle", "clauseComparisons item")?;
        require_string(clause, "summaryOfDifference", "clauseComparisons item")?;
        require_string(clause, "detailsDoc1", "clauseComparisons item")?;
        require_string(clause, "detailsDoc2", "clauseComparisons item")?;
    }

    for risk in require_array(obj, "riskProfileDifferences", "comparison")? {
        let risk = require_object(risk, "riskProfileDifferences item")?;
        require_string(risk, "riskTitle", "riskProfileDifferences item")?;
        require_string(risk, "summaryOfDifference", "riskProfileDifferences item")?;
        require_string(risk, "riskInDoc1", "riskProfileDifferences item")?;
        require_string(risk, "riskInDoc2", "riskProfileDifferences item")?;
    }

    Ok(())
}

fn require_object<'a>(
    value: &'a Value,
    context: &str,
) -> Result<&'a serde_json::Map<String, Value>, GatewayError> {
    value
        .as_object()
        .ok_or_else(|| GatewayError::Schema(format!("{context} must be an object")))
}

fn require_string<'a>(
    obj: &'a serde_json::Map<String, Value>,
    field: &str,
    context: &str,
) -> Result<&'a str, GatewayError> {
    obj.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::Schema(format!("{context} is missing string field {field:?}")))
}

fn require_array<'a>(
    obj: &'a serde_json::Map<String, Value>,
    field: &str,
    context: &str,
) -> Result<&'a Vec<Value>, GatewayError> {
    obj.get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| GatewayError::Schema(format!("{context} is missing array field {field:?}")))
}
