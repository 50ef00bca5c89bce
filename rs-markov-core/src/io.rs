use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::{fs, io};

/// Extension of the corpus files served from a data folder.
pub const CORPUS_EXTENSION: &str = "txt";

/// Reads a text file and returns its whole content.
///
/// The content is kept verbatim; tokenization is left to `ChainBuilder`.
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Lists the corpora of a data folder.
///
/// A corpus is a regular `.txt` file directly inside `dir`; its name is the
/// file stem (`data/gettysburg.txt` → `gettysburg`). Names are sorted.
pub fn list_corpora<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
	let mut names = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if !path.is_file() || path.extension() != Some(OsStr::new(CORPUS_EXTENSION)) {
			continue;
		}
		if let Some(stem) = path.file_stem() {
			names.push(stem.to_string_lossy().into_owned());
		}
	}

	names.sort();
	Ok(names)
}
