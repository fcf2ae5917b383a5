//! Reads a road graph from an adjacency list and a coordinates CSV.
//!
//! - The coordinates CSV has a header. The node name column is the first one
//!   called `name`, `city` or `town` (any case), falling back to the first
//!   column. Latitude is the first column containing `lat`, longitude the
//!   first one containing `lon` or `lng`.
//! - The adjacency file has one `A B` pair per line.
//!
//! Nodes are placed at `(lon, lat)` and edges weigh the straight-line distance
//! between their ends. Edges touching a node without coordinates travel at
//! the default weight.

use std::path::Path;
use std::path::PathBuf;

use crate::error::LoadError;
use crate::graph::Graph;
use crate::graph::NodeId;
use crate::graph::Position;
use crate::graph::WeightedGraph;

/// Column positions in the coordinates CSV.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct CoordinateColumns {
    name: usize,
    lat: usize,
    lon: usize,
}

impl CoordinateColumns {
    fn detect(headers: &csv::StringRecord, path: &Path) -> Result<Self, LoadError> {
        let lower: Vec<String> = headers.iter().map(str::to_lowercase).collect();
        let find = |matches: &dyn Fn(&str) -> bool| lower.iter().position(|h| matches(h));
        let missing = |column: &'static str| LoadError::MissingColumn {
            column,
            path: path.to_path_buf(),
            headers: headers.iter().map(str::to_string).collect(),
        };

        let name = find(&|h| matches!(h, "name" | "city" | "town")).unwrap_or(0);
        let lat = find(&|h| h.contains("lat")).ok_or_else(|| missing("latitude"))?;
        let lon = find(&|h| h.contains("lon") || h.contains("lng"))
            .ok_or_else(|| missing("longitude"))?;
        Ok(Self { name, lat, lon })
    }
}

/// Loads both files into a new graph.
pub fn load_graph(
    adjacency: impl AsRef<Path>,
    coordinates: impl AsRef<Path>,
) -> Result<Graph, LoadError> {
    let mut graph = Graph::new();
    load_coordinates(&mut graph, coordinates.as_ref())?;
    load_adjacencies(&mut graph, adjacency.as_ref())?;
    log::info!("Loaded {graph}");
    Ok(graph)
}

/// Adds a positioned node per row of the coordinates CSV.
///
/// Returns the number of rows read.
pub fn load_coordinates(graph: &mut Graph, path: &Path) -> Result<usize, LoadError> {
    let csv_error = |e| LoadError::CsvError {
        path: path.to_path_buf(),
        e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let columns = CoordinateColumns::detect(reader.headers().map_err(csv_error)?, path)?;
    log::debug!("Coordinate columns in {}: {columns:?}", path.display());

    let mut rows = 0usize;
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let Some(name) = record.get(columns.name).filter(|n| !n.is_empty()) else {
            log::warn!("Skipping unnamed row {:?} in {}", record, path.display());
            continue;
        };
        let lat = parse_coordinate(&record, columns.lat, "latitude", name, path)?;
        let lon = parse_coordinate(&record, columns.lon, "longitude", name, path)?;

        if graph.contains(&NodeId::from(name)) {
            log::warn!("{name} appears twice in {}, keeping the last row", path.display());
        }
        graph.add_node_with_position(name, Position::new(lon, lat));
        rows += 1;
    }
    Ok(rows)
}

fn parse_coordinate(
    record: &csv::StringRecord,
    column: usize,
    column_name: &'static str,
    node: &str,
    path: &Path,
) -> Result<f64, LoadError> {
    let value = record.get(column).unwrap_or_default();
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LoadError::InvalidCoordinate {
            column: column_name,
            node: node.to_string(),
            value: value.to_string(),
            path: path.to_path_buf(),
        }),
    }
}

/// Adds an edge per `A B` line of the adjacency file.
///
/// Returns the number of new edges.
pub fn load_adjacencies(graph: &mut Graph, path: &Path) -> Result<usize, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::IOError {
        path: PathBuf::from(path),
        e,
    })?;

    let mut added = 0usize;
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let &[a, b] = tokens.as_slice() else {
            log::warn!(
                "Skipping line {} of {}: expected 2 names, got {:?}",
                i + 1,
                path.display(),
                tokens
            );
            continue;
        };

        let (pa, pb) = (
            graph.position(&NodeId::from(a)),
            graph.position(&NodeId::from(b)),
        );
        let new = match (pa, pb) {
            (Some(pa), Some(pb)) => graph.add_edge(a, b, pa.distance(&pb))?,
            _ => graph.add_unweighted_edge(a, b),
        };
        if new {
            added += 1;
        }
    }
    Ok(added)
}
