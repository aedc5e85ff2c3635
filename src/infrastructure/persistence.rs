use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::{BoundaryGraph, GraphDocument};
use crate::error::{ConvertError, Result};

/// Reads every line of the input. A line that is not valid UTF-8 is reported
/// as malformed content rather than as an unreadable file.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let not_found = |source| ConvertError::InputNotFound { path: path.to_path_buf(), source };
    let file = File::open(path).map_err(not_found)?;
    let mut lines = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        match line {
            Ok(line) => lines.push(line),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(ConvertError::MalformedLine {
                    line: i + 1,
                    reason: format!("not valid UTF-8: {}", e),
                });
            }
            Err(e) => return Err(not_found(e)),
        }
    }
    debug!(path = %path.display(), lines = lines.len(), "read input");
    Ok(lines)
}

/// Writes the graph as JSON. The document is fully serialized before the
/// destination is touched and lands through a rename, so a failed run never
/// leaves a truncated file at `path`.
pub fn save_graph(graph: &BoundaryGraph, path: &Path) -> Result<()> {
    let failed = |source| ConvertError::OutputWriteFailure { path: path.to_path_buf(), source };
    let bytes = serde_json::to_vec(&graph.to_document()).map_err(|e| failed(e.into()))?;

    let tmp = temp_path(path);
    let written = write_file(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path));
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp);
        return Err(failed(source));
    }
    debug!(path = %path.display(), bytes = bytes.len(), "wrote graph");
    Ok(())
}

pub fn load_graph(path: &Path) -> Result<BoundaryGraph> {
    let file = File::open(path)
        .map_err(|source| ConvertError::InputNotFound { path: path.to_path_buf(), source })?;
    let reader = BufReader::new(file);
    let document: GraphDocument = serde_json::from_reader(reader)
        .map_err(|e| ConvertError::InvalidDocument(format!("{}: {}", path.display(), e)))?;
    document.into_graph()
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.into_inner().map_err(|e| e.into_error())?.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
