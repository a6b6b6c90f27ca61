//! File migrations that move legacy configuration into its new home

use crate::error::Result;
use crate::fs::FileSystem;
use crate::options::{Options, BP_CONFIG_DIR};
use crate::progress::{MigrationEvent, MigrationHandler};
use std::path::{Path, PathBuf};

pub const EXTENSIONS_INI: &str = ".php.ini.d/compat-extensions.ini";
pub const ADDITIONAL_COMMANDS_SCRIPT: &str = ".profile.d/additional-cmds.sh";

/// Copies `.bp-config/php/<source>/*.<extension>` into `<destination>` at the app root
#[derive(Debug, Clone, Copy)]
pub struct SnippetMigration {
    pub kind: &'static str,
    pub source: &'static str,
    pub destination: &'static str,
    pub extension: &'static str,
}

impl SnippetMigration {
    pub const PHP_INI: Self = Self {
        kind: "PHP INI",
        source: "php.ini.d",
        destination: ".php.ini.d",
        extension: "ini",
    };

    pub const PHP_FPM: Self = Self {
        kind: "PHP-FPM",
        source: "fpm.d",
        destination: ".php.fpm.d",
        extension: "conf",
    };

    pub const ALL: [Self; 2] = [Self::PHP_INI, Self::PHP_FPM];

    /// Returns the number of snippets copied.
    pub fn migrate(
        &self,
        fs: &dyn FileSystem,
        app_root: &Path,
        handler: &dyn MigrationHandler,
    ) -> Result<usize> {
        let source_dir = app_root.join(BP_CONFIG_DIR).join("php").join(self.source);
        if !fs.is_dir(&source_dir) {
            return Ok(0);
        }

        let destination_dir = app_root.join(self.destination);
        let mut snippets: Vec<_> = fs
            .read_dir(&source_dir)?
            .into_iter()
            .filter(|e| e.has_extension(self.extension))
            .collect();
        snippets.sort_by(|a, b| a.name.cmp(&b.name));

        for snippet in &snippets {
            fs.copy_file(snippet.path(), &destination_dir.join(snippet.file_name()))?;
        }

        if !snippets.is_empty() {
            handler.on_event(&MigrationEvent::SnippetsMigrated {
                kind: self.kind.to_string(),
                count: snippets.len(),
                destination: self.destination.to_string(),
            });
        }
        Ok(snippets.len())
    }
}

pub fn extensions_ini(options: &Options) -> String {
    let mut ini = String::new();
    for ext in &options.php.extensions {
        ini.push_str(&format!("extension={}.so\n", ext));
    }
    for ext in &options.php.zend_extensions {
        ini.push_str(&format!("zend_extension={}.so\n", ext));
    }
    ini
}

/// Writes PHP_EXTENSIONS and ZEND_EXTENSIONS to an ini snippet, if any are set.
pub fn migrate_extensions(
    fs: &dyn FileSystem,
    app_root: &Path,
    options: &Options,
    handler: &dyn MigrationHandler,
) -> Result<Option<PathBuf>> {
    let ini = extensions_ini(options);
    if ini.is_empty() {
        return Ok(None);
    }

    let path = app_root.join(EXTENSIONS_INI);
    fs.write_file(&path, &ini)?;
    handler.on_event(&MigrationEvent::ExtensionsMigrated {
        extensions: options.php.extensions.len(),
        zend_extensions: options.php.zend_extensions.len(),
        path: path.display().to_string(),
    });
    Ok(Some(path))
}

/// Writes ADDITIONAL_PREPROCESS_CMDS to a `.profile.d` script, one command per line.
pub fn migrate_additional_commands(
    fs: &dyn FileSystem,
    app_root: &Path,
    options: &Options,
    handler: &dyn MigrationHandler,
) -> Result<Option<PathBuf>> {
    let commands = &options.php.additional_commands;
    if commands.is_empty() {
        return Ok(None);
    }

    let mut script = String::new();
    for command in commands {
        script.push_str(command);
        script.push('\n');
    }

    let path = app_root.join(ADDITIONAL_COMMANDS_SCRIPT);
    fs.write_file(&path, &script)?;
    handler.on_event(&MigrationEvent::AdditionalCommandsMigrated {
        count: commands.len(),
        path: path.display().to_string(),
    });
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::progress::{NoOpHandler, RecordingHandler};

    fn app_root() -> &'static Path {
        Path::new("/app")
    }

    #[test]
    fn test_migrates_php_ini_snippets() {
        let fs = MockFileSystem::new();
        fs.add_file(".bp-config/php/php.ini.d/test.ini", "contents");
        fs.add_file(".bp-config/php/php.ini.d/another.ini", "more contents");
        fs.add_file(".bp-config/php/php.ini.d/README.md", "ignored");

        let count = SnippetMigration::PHP_INI
            .migrate(&fs, app_root(), &NoOpHandler)
            .unwrap();

        assert_eq!(count, 2);
        assert!(fs.is_file(Path::new("/app/.php.ini.d/test.ini")));
        assert!(fs.is_file(Path::new("/app/.php.ini.d/another.ini")));
        assert!(!fs.exists(Path::new("/app/.php.ini.d/README.md")));
        assert!(fs.is_file(Path::new("/app/.bp-config/php/php.ini.d/test.ini")));
    }

    #[test]
    fn test_migrates_fpm_snippets() {
        let fs = MockFileSystem::new();
        fs.add_file(".bp-config/php/fpm.d/test.conf", "contents");
        fs.add_file(".bp-config/php/fpm.d/another.conf", "more contents");
        let handler = RecordingHandler::new();

        let count = SnippetMigration::PHP_FPM
            .migrate(&fs, app_root(), &handler)
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            fs.read_to_string(Path::new("/app/.php.fpm.d/another.conf"))
                .unwrap(),
            "more contents"
        );
        assert_eq!(
            handler.messages(),
            vec!["Migrated 2 PHP-FPM snippets to `.php.fpm.d`"]
        );
    }

    #[test]
    fn test_missing_snippet_dir_is_noop() {
        let fs = MockFileSystem::new();
        let handler = RecordingHandler::new();

        for migration in SnippetMigration::ALL {
            assert_eq!(migration.migrate(&fs, app_root(), &handler).unwrap(), 0);
        }
        assert!(handler.events().is_empty());
    }

    #[test]
    fn test_migrates_php_extensions() {
        let fs = MockFileSystem::new();
        let mut options = Options::default();
        options.php.extensions = vec!["ext1".to_string(), "ext2".to_string()];

        let path = migrate_extensions(&fs, app_root(), &options, &NoOpHandler)
            .unwrap()
            .unwrap();

        let ini = fs.read_to_string(&path).unwrap();
        assert!(ini.contains("extension=ext1.so"));
        assert!(ini.contains("extension=ext2.so"));
    }

    #[test]
    fn test_migrates_zend_extensions_after_extensions() {
        let fs = MockFileSystem::new();
        let mut options = Options::default();
        options.php.extensions = vec!["bz2".to_string()];
        options.php.zend_extensions = vec!["zext1".to_string(), "zext2".to_string()];

        migrate_extensions(&fs, app_root(), &options, &NoOpHandler).unwrap();

        assert_eq!(
            fs.read_to_string(Path::new("/app/.php.ini.d/compat-extensions.ini"))
                .unwrap(),
            "extension=bz2.so\nzend_extension=zext1.so\nzend_extension=zext2.so\n"
        );
    }

    #[test]
    fn test_no_extensions_writes_nothing() {
        let fs = MockFileSystem::new();
        let written = migrate_extensions(&fs, app_root(), &Options::default(), &NoOpHandler).unwrap();

        assert!(written.is_none());
        assert!(!fs.exists(Path::new("/app/.php.ini.d")));
    }

    #[test]
    fn test_migrates_additional_commands() {
        let fs = MockFileSystem::new();
        let mut options = Options::default();
        options.php.additional_commands =
            vec!["some-command".to_string(), "another-command".to_string()];

        let path = migrate_additional_commands(&fs, app_root(), &options, &NoOpHandler)
            .unwrap()
            .unwrap();

        assert_eq!(path, PathBuf::from("/app/.profile.d/additional-cmds.sh"));
        assert_eq!(
            fs.read_to_string(&path).unwrap(),
            "some-command\nanother-command\n"
        );
    }

    #[test]
    fn test_no_additional_commands_writes_nothing() {
        let fs = MockFileSystem::new();
        let written =
            migrate_additional_commands(&fs, app_root(), &Options::default(), &NoOpHandler).unwrap();
        assert!(written.is_none());
    }
}
