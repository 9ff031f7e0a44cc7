//! Site files: CSV lists of nodes and access points.
//!
//! Both files share one layout, header row required:
//!
//! ```text
//! kind,id,x,y
//! desktop,4c4c4544-0042-3510-8052-b4c04f4e4d32,12.5,3.0
//! ```
//!
//! A load is all or nothing: one malformed row fails the whole file.

use crate::error::{Error, Result};
use airsteer_geometry::{AccessPoint, ApKind, Node, NodeKind, Position};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// Columns every site file must have.
pub const COLUMNS: [&str; 4] = ["kind", "id", "x", "y"];

/// One row of a site file.
#[derive(Debug, Deserialize)]
struct SiteRecord {
    kind: String,
    id: String,
    x: f64,
    y: f64,
}

/// Load the client nodes.
pub fn load_nodes(path: &Path) -> Result<Vec<Node>> {
    let nodes = load_records(path)?
        .into_iter()
        .map(|r| {
            Node::new(NodeKind::from(r.kind.as_str()), r.id, Position::new(r.x, r.y))
        })
        .collect();
    Ok(nodes)
}

/// Load the access points.
pub fn load_access_points(path: &Path) -> Result<Vec<AccessPoint>> {
    let aps = load_records(path)?
        .into_iter()
        .map(|r| {
            AccessPoint::new(ApKind::from(r.kind.as_str()), r.id, Position::new(r.x, r.y))
        })
        .collect();
    Ok(aps)
}

fn load_records(path: &Path) -> Result<Vec<SiteRecord>> {
    let parse_error = |reason: String| Error::ConfigParse {
        path: path.to_path_buf(),
        reason,
    };

    // Dropped on every return path, so no handle outlives the cycle.
    let file = File::open(path).map_err(|e| parse_error(e.to_string()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| parse_error(e.to_string()))?
        .clone();
    for column in COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(parse_error(format!(
                "missing column {:?} (header must contain {})",
                column,
                COLUMNS.join(",")
            )));
        }
    }

    let mut records = Vec::new();
    let mut seen = HashSet::new();
    for (i, row) in reader.deserialize::<SiteRecord>().enumerate() {
        // line 1 is the header
        let line = i + 2;
        let record = row.map_err(|e| parse_error(format!("row {line}: {e}")))?;

        if record.id.is_empty() {
            return Err(parse_error(format!("row {line}: empty id")));
        }
        if !Position::new(record.x, record.y).is_finite() {
            return Err(parse_error(format!(
                "row {line}: non-finite position ({}, {})",
                record.x, record.y
            )));
        }
        if !seen.insert(record.id.clone()) {
            return Err(parse_error(format!("row {line}: duplicate id {:?}", record.id)));
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn site_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_nodes() {
        let file = site_file(
            "kind,id,x,y\n\
             desktop,4c4c4544-0042-3510-8052-b4c04f4e4d32,0,0\n\
             laptop,03000200-0400-0500-0006-000700080009,2.5,-3\n",
        );

        let nodes = load_nodes(file.path()).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind, NodeKind::Desktop);
        assert_eq!(nodes[0].id, "4c4c4544-0042-3510-8052-b4c04f4e4d32");
        assert_eq!(nodes[1].kind, NodeKind::Laptop);
        assert_eq!(nodes[1].position, Position::new(2.5, -3.0));
    }

    #[test]
    fn loads_access_points() {
        let file = site_file("kind,id,x,y\nap,AA:BB:CC:00:11:20,10,4\nmesh,AA:BB:CC:00:11:40,0,4\n");

        let aps = load_access_points(file.path()).unwrap();
        assert_eq!(aps.len(), 2);
        assert_eq!(aps[0].kind, ApKind::Ap);
        assert_eq!(aps[0].id, "AA:BB:CC:00:11:20");
        assert_eq!(aps[1].kind, ApKind::Other("mesh".into()));
    }

    #[test]
    fn columns_may_be_reordered_and_padded() {
        let file = site_file("id, x, y, kind\n n1 , 1 , 2 , desktop\n");

        let nodes = load_nodes(file.path()).unwrap();
        assert_eq!(nodes[0].id, "n1");
        assert_eq!(nodes[0].position, Position::new(1.0, 2.0));
    }

    #[test]
    fn header_only_is_empty_set() {
        let file = site_file("kind,id,x,y\n");
        assert!(load_access_points(file.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_header_fails() {
        let file = site_file("desktop,n1,0,0\nlaptop,n2,1,1\n");
        let err = load_nodes(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("missing column"));
    }

    #[test]
    fn malformed_row_fails_whole_load() {
        let file = site_file("kind,id,x,y\ndesktop,n1,0,0\ndesktop,n2,east,0\n");
        let err = load_nodes(file.path()).unwrap_err();
        assert!(matches!(&err, Error::ConfigParse { path, .. } if path == file.path()));
        assert!(err.to_string().contains("row 3"));
    }

    #[test]
    fn short_row_fails() {
        let file = site_file("kind,id,x,y\ndesktop,n1,0\n");
        assert!(load_nodes(file.path()).is_err());
    }

    #[test]
    fn empty_id_fails() {
        let file = site_file("kind,id,x,y\ndesktop,,0,0\n");
        let err = load_nodes(file.path()).unwrap_err();
        assert!(err.to_string().contains("empty id"));
    }

    #[test]
    fn non_finite_position_fails() {
        let file = site_file("kind,id,x,y\nap,a1,NaN,0\n");
        assert!(load_access_points(file.path()).is_err());
    }

    #[test]
    fn duplicate_id_fails() {
        let file = site_file("kind,id,x,y\nap,a1,0,0\nap,a1,5,5\n");
        let err = load_access_points(file.path()).unwrap_err();
        assert!(err.to_string().contains("duplicate id"));
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_nodes(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }
}
