use crate::error::SourceError;
use media_lookup_models::{MediaKind, RawLibraryRow};
use serde_json::{json, Value};

/// `VideoLibrary.*` method that lists one table
pub fn method_for(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "VideoLibrary.GetMovies",
        MediaKind::Show => "VideoLibrary.GetTVShows",
    }
}

/// JSON-RPC 2.0 envelope for a library listing, newest year first
pub fn build_request(kind: MediaKind, properties: &[&str]) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method_for(kind),
        "params": {
            "properties": properties,
            "sort": {"order": "descending", "method": "year"}
        }
    })
}

/// Extract the rows of a `GetMovies`/`GetTVShows` reply
///
/// A library without entries of this kind answers without the `movies` /
/// `tvshows` key, which is an empty table and not an error.
pub fn parse_rows(kind: MediaKind, response: Value) -> Result<Vec<RawLibraryRow>, SourceError> {
    if let Some(error) = response.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(SourceError::JsonRpc { code, message });
    }

    let key = format!("{}s", kind.dbtype());
    let rows = match response.get("result").and_then(|result| result.get(&key)) {
        Some(rows) => rows.clone(),
        None => return Ok(Vec::new()),
    };

    Ok(serde_json::from_value(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_envelope() {
        let request = build_request(MediaKind::Show, &["title", "episode"]);
        assert_eq!(request["jsonrpc"], "2.0");
        assert_eq!(request["id"], 1);
        assert_eq!(request["method"], "VideoLibrary.GetTVShows");
        assert_eq!(request["params"]["properties"], json!(["title", "episode"]));
        assert_eq!(request["params"]["sort"]["order"], "descending");
        assert_eq!(request["params"]["sort"]["method"], "year");
    }

    #[test]
    fn test_parse_rows_movies() {
        let response = json!({
            "id": 1,
            "jsonrpc": "2.0",
            "result": {
                "limits": {"start": 0, "end": 2, "total": 2},
                "movies": [
                    {"movieid": 3, "label": "Dune", "title": "Dune", "year": 2021, "imdbnumber": "tt1160419", "playcount": 2, "file": "/movies/dune.mkv"},
                    {"movieid": 1, "label": "Dune", "title": "Dune", "year": 1984, "imdbnumber": "", "playcount": 0, "file": ""}
                ]
            }
        });
        let rows = parse_rows(MediaKind::Movie, response).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].dbid, Some(3));
        assert_eq!(rows[0].imdbnumber.as_deref(), Some("tt1160419"));
        assert_eq!(rows[1].playcount, Some(0));
    }

    #[test]
    fn test_parse_rows_missing_table_is_empty() {
        let response = json!({"id": 1, "jsonrpc": "2.0", "result": {"limits": {"start": 0, "end": 0, "total": 0}}});
        assert!(parse_rows(MediaKind::Show, response).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rows_error_reply() {
        let response = json!({"id": 1, "jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found."}});
        match parse_rows(MediaKind::Movie, response) {
            Err(SourceError::JsonRpc { code, message }) => {
                assert_eq!(code, -32601);
                assert_eq!(message, "Method not found.");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
