use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use eyre::Result;

/// Write contents to a file on the disc, creating parent directories as needed
///
/// ```no_run
/// use opref_common::utils::io::file::write_file;
///
/// let path = "/tmp/reference.json";
/// let contents = "[]";
/// let result = write_file(path, contents);
/// ```
pub fn write_file(path_str: &str, contents: &str) -> Result<()> {
    let path = Path::new(path_str);

    // Create the directory if it doesn't exist
    std::fs::create_dir_all(
        path.parent().ok_or_else(|| eyre::eyre!("unable to create directory"))?,
    )?;

    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;

    Ok(())
}

/// Read contents from a file on the disc
///
/// ```no_run
/// use opref_common::utils::io::file::read_file;
///
/// let path = "/tmp/chainspec.json";
/// let contents = read_file(path);
/// ```
pub fn read_file(path: &str) -> Result<String> {
    let path = Path::new(path);
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Delete a file or directory from the disc. Missing paths are not an error.
///
/// ```no_run
/// use opref_common::utils::io::file::delete_path;
///
/// let path = "/tmp/reference.json";
/// let result = delete_path(path);
/// ```
pub fn delete_path(path: &str) -> Result<()> {
    let path = Path::new(path);
    if path.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_file_successful() {
        let path = std::env::temp_dir().join("opref-io-tests/write/test.txt");
        let result = write_file(path.to_str().expect("non-utf8 path"), "Hello, World!");
        assert!(result.is_ok());
    }

    #[test]
    fn test_read_file_successful() {
        let path = std::env::temp_dir().join("opref-io-tests/read/test.txt");
        let path = path.to_str().expect("non-utf8 path");
        write_file(path, "Hello, World!").expect("unable to write file");

        let result = read_file(path).expect("unable to read file");
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_read_file_failure() {
        let path = "/nonexistent/test2.txt";
        let result = read_file(path);
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_path_successful() {
        let dir = std::env::temp_dir().join("opref-io-tests/delete");
        let file = dir.join("nested/test.txt");
        write_file(file.to_str().expect("non-utf8 path"), "bye").expect("unable to write file");

        delete_path(dir.to_str().expect("non-utf8 path")).expect("unable to delete directory");
        assert!(!dir.exists());
    }

    #[test]
    fn test_delete_path_missing() {
        let result = delete_path("/nonexistent/test_dir2");
        assert!(result.is_ok());
    }
}
