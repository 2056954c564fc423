use clap::Args;
use moo_core::{
    models::{CatalogError, Client, Offer},
    ports::{ClientDirectory, OfferSource},
};
use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write, stdin, stdout},
    path::{Path, PathBuf},
    str::FromStr,
};

// Every subcommand reads one JSON document and writes one result.
// This struct standardizes their implementation.
#[derive(Args)]
pub struct IOArgs {
    /// The client JSON file, or a population as JSON or `.csv` ("-" implies stdin)
    #[arg(value_parser = clap::value_parser!(PathOrStd))]
    input: PathOrStd,

    /// The output file ("-" implies stdout)
    #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
    output: PathOrStd,
}

impl IOArgs {
    pub fn read(&self) -> Result<Box<dyn Read>, std::io::Error> {
        match &self.input {
            PathOrStd::Path(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
            PathOrStd::Std => Ok(Box::new(stdin().lock())),
        }
    }

    pub fn write(&self) -> Result<Box<dyn Write>, std::io::Error> {
        match &self.output {
            PathOrStd::Path(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
            PathOrStd::Std => Ok(Box::new(stdout().lock())),
        }
    }

    pub fn extension(&self) -> Option<&str> {
        match &self.output {
            PathOrStd::Path(path) => path.extension(),
            PathOrStd::Std => None,
        }
        .and_then(|ext| ext.to_str())
    }

    /// Deserialize the input document
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, LoadError> {
        Ok(serde_json::from_reader(self.read()?)?)
    }
}

// A population is read from the command's input, as a CSV table when the
// file says so and as a JSON array otherwise
impl ClientDirectory for IOArgs {
    type Error = LoadError;

    fn load_clients(&self) -> Result<Vec<Client>, Self::Error> {
        match &self.input {
            PathOrStd::Path(path) if is_csv(path) => read_csv(open(path)?),
            _ => self.parse(),
        }
    }
}

#[derive(Clone)]
enum PathOrStd {
    Path(PathBuf),
    Std,
}

impl FromStr for PathOrStd {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Self::Std)
        } else {
            Ok(Self::Path(s.parse()?))
        }
    }
}

/// A file of offer records: a CSV table with a header row if the extension
/// is `.csv`, a JSON array otherwise
pub struct OfferFile<'a>(pub &'a Path);

impl OfferSource for OfferFile<'_> {
    type Error = LoadError;

    fn load_offers(&self) -> Result<Vec<Offer>, Self::Error> {
        if is_csv(self.0) {
            read_csv(open(self.0)?)
        } else {
            read_json(self.0)
        }
    }
}

/// Deserialize a JSON document from a file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    Ok(serde_json::from_reader(open(path)?)?)
}

/// Deserialize every row of a CSV table, matching columns by header name
pub fn read_csv<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, LoadError> {
    csv::Reader::from_reader(reader)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(Into::into)
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;
    Ok(BufReader::new(file))
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("unable to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
