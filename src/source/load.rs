use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::FeatureCollection;

/// Load a GeoJSON FeatureCollection from disk. `.gz` files are decompressed
/// on the fly.
pub fn load_collection(path: &Path, id_properties: &[String]) -> Result<FeatureCollection> {
    info!("Loading boundaries from {}", path.display());

    let file = File::open(path)?;
    let mut reader: Box<dyn Read> = if path.extension().map_or(false, |e| e == "gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.is_empty() {
        return Err(Error::InvalidGeoJson(format!("{} is empty", path.display())));
    }

    let collection = FeatureCollection::from_slice(&bytes, id_properties)?;
    info!("Loaded {} features", collection.len());
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const SAMPLE: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "id": "USA", "geometry": {"type": "Polygon",
         "coordinates": [[[-130, 20], [-60, 20], [-60, 50], [-130, 50]]]}}
    ]}"#;

    #[test]
    fn test_load_plain_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let fc = load_collection(file.path(), &[]).unwrap();
        assert_eq!(fc.len(), 1);
        assert_eq!(fc.features[0].id.as_deref(), Some("USA"));
    }

    #[test]
    fn test_load_gzip_file() {
        let file = tempfile::Builder::new().suffix(".json.gz").tempfile().unwrap();
        let mut encoder = GzEncoder::new(file.reopen().unwrap(), Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let fc = load_collection(file.path(), &[]).unwrap();
        assert_eq!(fc.len(), 1);
    }

    #[test]
    fn test_empty_file_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            load_collection(file.path(), &[]),
            Err(Error::InvalidGeoJson(_))
        ));
    }

    #[test]
    fn test_empty_gzip_rejected() {
        let file = tempfile::Builder::new().suffix(".json.gz").tempfile().unwrap();
        GzEncoder::new(file.reopen().unwrap(), Compression::default())
            .finish()
            .unwrap();

        assert!(matches!(
            load_collection(file.path(), &[]),
            Err(Error::InvalidGeoJson(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_collection(Path::new("/nonexistent/world.json"), &[]),
            Err(Error::Io(_))
        ));
    }
}
