pub mod cell;
pub mod images;

pub use cell::Cell;

use crate::config::DatasetConfig;
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};

/// One leading row of a split, keyed by column name
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Zero-based row position in the split
    pub index: usize,
    pub fields: Vec<(String, Cell)>,
}

impl Sample {
    pub fn new(index: usize, fields: Vec<(String, Cell)>) -> Self {
        Self { index, fields }
    }

    /// Value of a column, if the row has it
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}

/// A Parquet file holding one split of the dataset
pub struct DatasetSplit {
    /// Label used in output file names (`train`, `val`)
    pub label: String,
    pub path: PathBuf,
    reader: SerializedFileReader<File>,
}

impl DatasetSplit {
    /// Open a split and read its footer
    pub fn open(path: &Path, label: &str) -> Result<Self, Box<dyn Error>> {
        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        Ok(Self {
            label: label.to_string(),
            path: path.to_path_buf(),
            reader,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.reader.metadata().file_metadata().num_rows().max(0) as usize
    }

    /// Names of the top-level columns
    pub fn columns(&self) -> Vec<String> {
        self.reader
            .metadata()
            .file_metadata()
            .schema_descr()
            .root_schema()
            .get_fields()
            .iter()
            .map(|field| field.name().to_string())
            .collect()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows(), self.columns().len())
    }

    /// Read the first `count` rows
    pub fn samples(&self, count: usize) -> Result<Vec<Sample>, Box<dyn Error>> {
        let mut samples = Vec::with_capacity(count);
        for (index, row) in self.reader.get_row_iter(None)?.take(count).enumerate() {
            let row = row?;
            let fields = row
                .get_column_iter()
                .map(|(name, value)| (name.clone(), Cell::from(value)))
                .collect();
            samples.push(Sample::new(index, fields));
        }
        Ok(samples)
    }
}

/// Print a sample's problem and answer and save its first image.
///
/// Image failures are reported and never abort the caller.
pub fn show_sample(sample: &Sample, split: &str, image_dir: &Path) {
    println!("  Problem: {}", display_or_missing(sample.get("problem")));
    println!("  Answer: {}", display_or_missing(sample.get("answer")));

    let images = match sample.get("images") {
        None | Some(Cell::Null) => {
            println!("  No image data");
            return;
        }
        Some(images) => images,
    };
    println!("  Image data type: {}", images.kind());

    let Some(image) = images::first_image(images) else {
        println!("    Unsupported image data type: {}", images.kind());
        return;
    };
    if !matches!(image, Cell::Record(_)) {
        println!("    Unknown image entry format: {}", image.kind());
        return;
    }

    let file_stem = format!("{}_sample_{}", split, sample.index);
    match images::save_image(image, &file_stem, image_dir) {
        Ok(saved) => {
            println!("    Image saved as: {}", saved.display());
            if let Some(path) = image.get("path") {
                println!("    Image path: {}", path);
            }
        }
        Err(e) => {
            ::log::warn!("Failed to save image for {} row {}: {}", split, sample.index, e);
            println!("    Error saving image: {}", e);
        }
    }
}

fn display_or_missing(value: Option<&Cell>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<missing>".to_string())
}

/// Print shape, columns and leading samples of the train and validation splits
pub fn run_sample_viewer(config: &DatasetConfig) {
    println!("{}", "=".repeat(50));
    println!("Dataset samples");
    println!("{}", "=".repeat(50));

    let splits = [
        (config.train_path.as_path(), "train"),
        (config.val_path.as_path(), "val"),
    ];

    let mut opened = Vec::new();
    for (path, label) in splits {
        match DatasetSplit::open(path, label) {
            Ok(split) => {
                let (rows, columns) = split.shape();
                println!("{} shape: ({}, {})", label, rows, columns);
                opened.push(split);
            }
            Err(e) => ::log::error!("Failed to load {} split from {}: {}", label, path.display(), e),
        }
    }

    if let Some(first) = opened.first() {
        println!("\nColumns:");
        for (i, column) in first.columns().iter().enumerate() {
            println!("  {}. {}", i + 1, column);
        }
    }

    if let Err(e) = std::fs::create_dir_all(&config.image_dir) {
        ::log::error!("Failed to create {}: {}", config.image_dir.display(), e);
    }

    for split in &opened {
        println!("\n{} samples:", split.label);
        let samples = match split.samples(config.sample_rows) {
            Ok(samples) => samples,
            Err(e) => {
                ::log::error!("Failed to read rows of {}: {}", split.path.display(), e);
                continue;
            }
        };
        for sample in &samples {
            println!("\nSample {}:", sample.index + 1);
            show_sample(sample, &split.label, &config.image_dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_with_images(images: Cell) -> Sample {
        Sample::new(
            4,
            vec![
                ("problem".to_string(), Cell::Text("Find angle ABC.".to_string())),
                ("answer".to_string(), Cell::Text("45".to_string())),
                ("images".to_string(), images),
            ],
        )
    }

    fn image_record(bytes: Vec<u8>) -> Cell {
        Cell::Record(vec![
            ("bytes".to_string(), Cell::Bytes(bytes)),
            ("path".to_string(), Cell::Text("geo/4.jpg".to_string())),
        ])
    }

    #[test]
    fn test_sample_lookup() {
        let sample = sample_with_images(Cell::Null);

        assert_eq!(sample.get("answer"), Some(&Cell::Text("45".to_string())));
        assert_eq!(sample.get("solution"), None);
        assert_eq!(display_or_missing(sample.get("solution")), "<missing>");
    }

    #[test]
    fn test_show_sample_saves_first_image_of_list() {
        let dir = tempfile::tempdir().unwrap();
        let sample = sample_with_images(Cell::List(vec![
            image_record(vec![1, 2, 3]),
            image_record(vec![9, 9, 9]),
        ]));

        show_sample(&sample, "train", dir.path());

        let saved = std::fs::read(dir.path().join("train_sample_4.jpg")).unwrap();
        assert_eq!(saved, vec![1, 2, 3]);
    }

    #[test]
    fn test_show_sample_accepts_single_record() {
        let dir = tempfile::tempdir().unwrap();
        let record = Cell::Record(vec![
            ("bytes".to_string(), Cell::Text("AQID".to_string())),
            ("path".to_string(), Cell::Null),
        ]);

        show_sample(&sample_with_images(record), "val", dir.path());

        let saved = std::fs::read(dir.path().join("val_sample_4.jpg")).unwrap();
        assert_eq!(saved, vec![1, 2, 3]);
    }

    #[test]
    fn test_show_sample_survives_bad_images() {
        let dir = tempfile::tempdir().unwrap();

        for images in [
            Cell::Null,
            Cell::List(Vec::new()),
            Cell::List(vec![Cell::Text("not a record".to_string())]),
            Cell::Scalar("7".to_string()),
            Cell::Text("geo/4.jpg".to_string()),
            Cell::Record(vec![("bytes".to_string(), Cell::Text("@@@".to_string()))]),
        ] {
            show_sample(&sample_with_images(images), "train", dir.path());
        }

        assert!(!dir.path().join("train_sample_4.jpg").exists());
    }

    fn write_text_split(path: &Path, rows: usize) {
        use parquet::data_type::{ByteArray, ByteArrayType};
        use parquet::file::properties::WriterProperties;
        use parquet::file::writer::SerializedFileWriter;
        use parquet::schema::parser::parse_message_type;
        use std::sync::Arc;

        let schema = Arc::new(
            parse_message_type(
                "message schema { REQUIRED BYTE_ARRAY problem (UTF8); REQUIRED BYTE_ARRAY answer (UTF8); }",
            )
            .unwrap(),
        );
        let props = Arc::new(WriterProperties::builder().build());
        let file = File::create(path).unwrap();
        let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();

        let mut row_group = writer.next_row_group().unwrap();
        let mut column_index = 0;
        while let Some(mut column) = row_group.next_column().unwrap() {
            let prefix = if column_index == 0 { "problem" } else { "answer" };
            let values: Vec<ByteArray> = (0..rows)
                .map(|i| ByteArray::from(format!("{} {}", prefix, i).as_str()))
                .collect();
            column
                .typed::<ByteArrayType>()
                .write_batch(&values, None, None)
                .unwrap();
            column.close().unwrap();
            column_index += 1;
        }
        row_group.close().unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn test_read_split_without_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.parquet");
        write_text_split(&path, 5);

        let split = DatasetSplit::open(&path, "train").unwrap();
        assert_eq!(split.shape(), (5, 2));
        assert_eq!(split.columns(), vec!["problem".to_string(), "answer".to_string()]);

        let samples = split.samples(3).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[1].index, 1);
        assert_eq!(samples[1].get("problem"), Some(&Cell::Text("problem 1".to_string())));
        assert_eq!(samples[2].get("answer"), Some(&Cell::Text("answer 2".to_string())));
        assert_eq!(samples[0].get("images"), None);

        // Asking for more rows than exist is not an error
        assert_eq!(split.samples(10).unwrap().len(), 5);

        show_sample(&samples[0], "train", dir.path());
        assert!(!dir.path().join("train_sample_0.jpg").exists());
    }

    #[test]
    fn test_run_sample_viewer_with_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let train_path = dir.path().join("train.parquet");
        write_text_split(&train_path, 2);
        let config = DatasetConfig {
            train_path,
            val_path: dir.path().join("missing.parquet"),
            sample_rows: 3,
            image_dir: dir.path().join("images"),
        };

        run_sample_viewer(&config);

        assert!(dir.path().join("images").is_dir());
    }

    #[test]
    fn test_missing_split_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DatasetSplit::open(&dir.path().join("missing.parquet"), "train").is_err());

        let not_parquet = dir.path().join("broken.parquet");
        std::fs::write(&not_parquet, b"definitely not parquet").unwrap();
        assert!(DatasetSplit::open(&not_parquet, "val").is_err());
    }
}
