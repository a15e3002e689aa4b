use crate::utils::whichever::define_whichever;
use flate2::{Compression, write::GzEncoder};
use std::{
    fs::File,
    io::{BufWriter, Error as IOError},
    path::Path,
};

define_whichever! {
    #[doc="An enum for the different acceptable output types for the gzip-convention outputs."]
    pub(crate) enum WriteFileZip {
        Plain(BufWriter<File>),
        Zipped(GzEncoder<BufWriter<File>>),
    }

    impl Write for WriteFileZip {}
}

/// Opens `path` for writing, gzip-encoding the stream when `path` ends in `.gz`.
///
/// Every `.gz` output in this crate follows the same naming convention, so the
/// decision to compress is made from the extension rather than threaded through
/// as a separate flag.
pub(crate) fn create_writer<P: AsRef<Path>>(path: P) -> Result<WriteFileZip, IOError> {
    let is_gz = path.as_ref().extension().is_some_and(|ext| ext == "gz");
    let file = File::create(&path)?;
    let buf_writer = BufWriter::new(file);

    Ok(if is_gz {
        WriteFileZip::Zipped(GzEncoder::new(buf_writer, Compression::default()))
    } else {
        WriteFileZip::Plain(buf_writer)
    })
}
