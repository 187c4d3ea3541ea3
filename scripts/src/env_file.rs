//! Read and patch `KEY=value` env files

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use regex::{NoExpand, Regex};

use crate::{constants::MODULE_ADDRESS_VAR, errors::ScriptError};

/// An env file loaded in memory.
///
/// Edits are line oriented: only the line holding the edited key changes, every other byte
/// of the file is written back untouched.
#[derive(Debug)]
pub struct EnvFile {
    /// Where the file is read from and written back to
    path: PathBuf,
    /// Raw content, edited in place
    content: String,
}

impl EnvFile {
    /// Read the env file at `path`, a missing file reads as empty
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ScriptError> {
        let path = path.into();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(source) => return Err(ScriptError::EnvFile { path, source }),
        };
        Ok(Self { path, content })
    }

    /// Write the content back to the file
    pub fn save(&self) -> Result<(), ScriptError> {
        fs::write(&self.path, &self.content).map_err(|source| ScriptError::EnvFile {
            path: self.path.clone(),
            source,
        })
    }

    /// Current content, edits included
    #[cfg(test)]
    fn content(&self) -> &str {
        &self.content
    }

    /// Value of the first `key=` line, if any
    pub fn get(&self, key: &str) -> Result<Option<&str>, ScriptError> {
        let matcher = key_matcher(key)?;
        Ok(matcher
            .captures(&self.content)
            .and_then(|caps| caps.get(1))
            .map(|value| value.as_str()))
    }

    /// Set `key` to `value`.
    ///
    /// The first existing `key=` line is replaced in place, otherwise a new line is appended.
    /// Returns true if the key was already present.
    pub fn upsert(&mut self, key: &str, value: &str) -> Result<bool, ScriptError> {
        let matcher = key_matcher(key)?;
        let entry = format!("{key}={value}");

        if matcher.is_match(&self.content) {
            self.content = matcher
                .replace(&self.content, NoExpand(&entry))
                .into_owned();
            return Ok(true);
        }

        let newline = if self.content.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        };
        if !self.content.is_empty() && !self.content.ends_with('\n') {
            self.content.push_str(newline);
        }
        self.content.push_str(&entry);
        self.content.push_str(newline);
        Ok(false)
    }
}

/// Load the env file at `path` into the process environment.
///
/// Variables already set in the environment take precedence. Returns false when there is no
/// file to load. A line the loader can't parse is an error: every variable after it would be
/// silently dropped otherwise.
pub fn load_into_process(path: &Path) -> Result<bool, ScriptError> {
    match dotenv::from_path(path) {
        Ok(()) => Ok(true),
        Err(dotenv::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(dotenv::Error::LineParse(line, _)) => Err(ScriptError::EnvFileParse {
            path: path.to_path_buf(),
            line: describe_line(&line),
        }),
        Err(source) => Err(ScriptError::EnvFileLoad {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Names a line by its key, the value may be a secret
fn describe_line(line: &str) -> String {
    match line.split_once('=') {
        Some((key, _)) => format!("the `{}` line", key.trim()),
        None => "a line without `=`".to_string(),
    }
}

/// Record the published module address in the env file at `path`
pub fn write_module_address(path: impl Into<PathBuf>, address: &str) -> Result<(), ScriptError> {
    let mut env_file = EnvFile::load(path)?;
    env_file.upsert(MODULE_ADDRESS_VAR, address)?;
    env_file.save()
}

/// Matches a whole `key=...` line, capturing the value.
///
/// CRLF mode keeps a trailing `\r` out of the match so Windows line endings survive.
fn key_matcher(key: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?mR)^{}=(.*)$", regex::escape(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "MODULE_ADDRESS";

    fn env_file(content: &str) -> EnvFile {
        EnvFile {
            path: PathBuf::from(".env"),
            content: content.to_string(),
        }
    }

    #[test]
    fn replaces_existing_line_in_place() {
        let mut file = env_file("APP_NETWORK=testnet\nMODULE_ADDRESS=0xold\nOTHER=1\n");
        assert!(file.upsert(KEY, "0xnew").unwrap());
        assert_eq!(
            file.content(),
            "APP_NETWORK=testnet\nMODULE_ADDRESS=0xnew\nOTHER=1\n"
        );
        assert_eq!(file.content().matches("MODULE_ADDRESS=").count(), 1);
    }

    #[test]
    fn appends_when_key_is_absent() {
        let mut file = env_file("APP_NETWORK=testnet\n");
        assert!(!file.upsert(KEY, "0xcafe").unwrap());
        assert_eq!(file.content(), "APP_NETWORK=testnet\nMODULE_ADDRESS=0xcafe\n");
    }

    #[test]
    fn appends_after_last_line_without_newline() {
        let mut file = env_file("APP_NETWORK=testnet");
        file.upsert(KEY, "0xcafe").unwrap();
        assert_eq!(file.content(), "APP_NETWORK=testnet\nMODULE_ADDRESS=0xcafe\n");

        let mut empty = env_file("");
        empty.upsert(KEY, "0xcafe").unwrap();
        assert_eq!(empty.content(), "MODULE_ADDRESS=0xcafe\n");
    }

    #[test]
    fn only_whole_key_lines_match() {
        let mut file = env_file("VITE_MODULE_ADDRESS=0x1\nMODULE_ADDRESS_OLD=0x2\n# MODULE_ADDRESS=0x3\n");
        assert!(!file.upsert(KEY, "0xcafe").unwrap());
        assert_eq!(
            file.content(),
            "VITE_MODULE_ADDRESS=0x1\nMODULE_ADDRESS_OLD=0x2\n# MODULE_ADDRESS=0x3\nMODULE_ADDRESS=0xcafe\n"
        );
    }

    #[test]
    fn keeps_crlf_line_endings() {
        let mut file = env_file("MODULE_ADDRESS=0xold\r\nAPP_NETWORK=devnet\r\n");
        file.upsert(KEY, "0xnew").unwrap();
        assert_eq!(file.content(), "MODULE_ADDRESS=0xnew\r\nAPP_NETWORK=devnet\r\n");

        file.upsert("EXTRA", "1").unwrap();
        assert_eq!(
            file.content(),
            "MODULE_ADDRESS=0xnew\r\nAPP_NETWORK=devnet\r\nEXTRA=1\r\n"
        );
    }

    #[test]
    fn value_is_inserted_literally() {
        let mut file = env_file("MODULE_ADDRESS=0xold\n");
        file.upsert(KEY, "$1${0}").unwrap();
        assert_eq!(file.get(KEY).unwrap(), Some("$1${0}"));
    }

    #[test]
    fn get_reads_first_matching_line() {
        let file = env_file("A=1\nMODULE_ADDRESS=0xfirst\nMODULE_ADDRESS=0xsecond\n");
        assert_eq!(file.get(KEY).unwrap(), Some("0xfirst"));
        assert_eq!(file.get("MISSING").unwrap(), None);
    }

    #[test]
    fn write_module_address_updates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "MODULE_ADDRESS=0xold\nAPP_NETWORK=testnet\n").unwrap();

        write_module_address(&path, "0xnew").unwrap();
        write_module_address(&path, "0xnewer").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "MODULE_ADDRESS=0xnewer\nAPP_NETWORK=testnet\n"
        );
    }

    #[test]
    fn load_and_save_roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");

        let mut file = EnvFile::load(&path).unwrap();
        assert_eq!(file.content(), "");
        file.upsert(KEY, "0xcafe").unwrap();
        file.save().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "MODULE_ADDRESS=0xcafe\n");
    }

    #[test]
    fn missing_env_file_is_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!load_into_process(&dir.path().join(".env")).unwrap());
    }

    #[test]
    fn env_file_is_loaded_without_overriding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "ENV_FILE_LOADED_VAR=from-file\nENV_FILE_PRESET_VAR=from-file\n",
        )
        .unwrap();
        std::env::set_var("ENV_FILE_PRESET_VAR", "from-process");

        assert!(load_into_process(&path).unwrap());
        assert_eq!(std::env::var("ENV_FILE_LOADED_VAR").unwrap(), "from-file");
        assert_eq!(std::env::var("ENV_FILE_PRESET_VAR").unwrap(), "from-process");
    }

    #[test]
    fn unparsable_line_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "ENV_FILE_PROJECT_NAME=iot dapp 0xsecret\nENV_FILE_AFTER_BAD_LINE=0xcafe\n",
        )
        .unwrap();

        let err = load_into_process(&path).unwrap_err();
        assert!(matches!(err, ScriptError::EnvFileParse { .. }));
        let message = err.to_string();
        assert!(message.contains("`ENV_FILE_PROJECT_NAME` line"), "{message}");
        assert!(!message.contains("0xsecret"), "{message}");
    }

    #[test]
    fn unparsable_line_is_named_by_key_only() {
        assert_eq!(describe_line("NAME=iot dapp"), "the `NAME` line");
        assert_eq!(describe_line("0xsecret with space"), "a line without `=`");
    }
}
