//! Nix rendering.
//!
//! Output depends only on the [`Recipe`], so identical inputs render to
//! byte-identical text.

use std::fmt;

use super::{Recipe, CURL_OPTS, DERIVATION_NAME, MANIFEST_SYMBOL};

/// Render `recipe` as a Nix expression taking `pkgs` as argument.
pub fn render(recipe: &Recipe) -> String {
    recipe.to_string()
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let curl_opts = CURL_OPTS
            .iter()
            .map(|opt| nix_string(opt))
            .collect::<Vec<_>>()
            .join(" ");

        writeln!(f, "{{ pkgs ? import <nixpkgs> {{}} }}:")?;
        writeln!(f)?;
        writeln!(f, "let")?;

        if !self.blobs.is_empty() {
            writeln!(f, "  # Model blobs, in manifest layer order.")?;
        }
        for blob in &self.blobs {
            writeln!(f, "  {} = pkgs.fetchurl {{", blob.symbol)?;
            writeln!(f, "    name = {};", nix_string(&blob.file_name))?;
            writeln!(f, "    curlOptsList = [{}];", curl_opts)?;
            writeln!(f, "    url = {};", nix_string(&blob.url))?;
            writeln!(f, "    hash = {};", nix_string(&blob.hash))?;
            writeln!(f, "  }};")?;
        }
        if !self.blobs.is_empty() {
            writeln!(f)?;
        }

        writeln!(f, "  # The manifest file itself.")?;
        writeln!(f, "  {} = pkgs.fetchurl {{", MANIFEST_SYMBOL)?;
        writeln!(f, "    curlOptsList = [{}];", curl_opts)?;
        writeln!(f, "    url = {};", nix_string(&self.manifest.url))?;
        writeln!(f, "    hash = {};", nix_string(&self.manifest.hash))?;
        writeln!(f, "  }};")?;
        writeln!(f, "in")?;

        writeln!(f, "  pkgs.symlinkJoin {{")?;
        writeln!(f, "    name = {};", nix_string(DERIVATION_NAME))?;
        writeln!(f)?;
        writeln!(f, "    paths = [")?;
        for input in self.inputs() {
            writeln!(f, "      {}", input)?;
        }
        writeln!(f, "    ];")?;
        writeln!(f)?;

        // Arrange the fetched files in the Ollama model store layout.
        writeln!(f, "    postBuild = ''")?;
        writeln!(f, "      mkdir -p $out/blobs")?;
        for blob in &self.blobs {
            writeln!(
                f,
                "      ln -s ${{{}}} $out/{}",
                blob.symbol,
                script_path(&format!("blobs/{}", blob.file_name))
            )?;
        }
        writeln!(f)?;
        writeln!(f, "      mkdir -p $out/{}", script_path(&self.manifest.dir))?;
        writeln!(
            f,
            "      ln -s ${{{}}} $out/{}",
            MANIFEST_SYMBOL,
            script_path(&format!(
                "{}/{}",
                self.manifest.dir, self.manifest.file_name
            ))
        )?;
        writeln!(f, "    '';")?;
        writeln!(f, "  }}")
    }
}

/// Quote `value` as a double-quoted Nix string.
fn nix_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a path relative to `$out` for the shell script inside a Nix
/// indented string.
///
/// Paths made of plain characters are written as-is; anything else is
/// single-quoted for the shell, then escaped for the indented string.
fn script_path(path: &str) -> String {
    let plain = path
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "._-+:/@=".contains(c));
    let word = if plain && !path.is_empty() {
        path.to_string()
    } else {
        format!("'{}'", path.replace('\'', r"'\''"))
    };
    escape_indented(&word)
}

/// Escape text for a Nix `''` string: `''` and `${` are special there.
fn escape_indented(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                out.push_str("'''");
            }
            '$' if chars.peek() == Some(&'{') => out.push_str("''$"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::{BlobFetch, ManifestFetch};
    use super::*;

    fn recipe(blobs: usize) -> Recipe {
        Recipe {
            blobs: (0..blobs)
                .map(|i| BlobFetch {
                    symbol: format!("blob_{}", i),
                    url: format!("https://r.example/v2/library/m/blobs/sha256:{:064x}", i),
                    hash: format!("sha256-HASH{}=", i),
                    file_name: format!("sha256-{:064x}", i),
                })
                .collect(),
            manifest: ManifestFetch {
                url: "https://r.example/v2/library/m/manifests/latest".into(),
                hash: "sha256-MANIFEST=".into(),
                dir: "manifests/r.example/m".into(),
                file_name: "latest".into(),
            },
        }
    }

    const EXPECTED_ONE_BLOB: &str = r#"{ pkgs ? import <nixpkgs> {} }:

let
  # Model blobs, in manifest layer order.
  blob_0 = pkgs.fetchurl {
    name = "sha256-0000000000000000000000000000000000000000000000000000000000000000";
    curlOptsList = ["-L" "-H" "Accept:application/octet-stream"];
    url = "https://r.example/v2/library/m/blobs/sha256:0000000000000000000000000000000000000000000000000000000000000000";
    hash = "sha256-HASH0=";
  };

  # The manifest file itself.
  manifestFile = pkgs.fetchurl {
    curlOptsList = ["-L" "-H" "Accept:application/octet-stream"];
    url = "https://r.example/v2/library/m/manifests/latest";
    hash = "sha256-MANIFEST=";
  };
in
  pkgs.symlinkJoin {
    name = "models";

    paths = [
      blob_0
      manifestFile
    ];

    postBuild = ''
      mkdir -p $out/blobs
      ln -s ${blob_0} $out/blobs/sha256-0000000000000000000000000000000000000000000000000000000000000000

      mkdir -p $out/manifests/r.example/m
      ln -s ${manifestFile} $out/manifests/r.example/m/latest
    '';
  }
"#;

    #[test]
    fn renders_single_blob_recipe() {
        assert_eq!(render(&recipe(1)), EXPECTED_ONE_BLOB);
    }

    #[test]
    fn counts_fetch_blocks_and_inputs() {
        let text = render(&recipe(3));
        assert_eq!(text.matches("pkgs.fetchurl {").count(), 4);
        assert_eq!(text.matches("manifestFile = pkgs.fetchurl").count(), 1);
        assert_eq!(text.matches("$out/blobs/sha256-").count(), 3);

        let paths = text
            .split("paths = [\n")
            .nth(1)
            .and_then(|rest| rest.split("    ];").next())
            .unwrap();
        let inputs: Vec<&str> = paths.lines().map(str::trim).collect();
        assert_eq!(inputs, vec!["blob_0", "blob_1", "blob_2", "manifestFile"]);
    }

    #[test]
    fn renders_without_blobs() {
        let text = render(&recipe(0));
        assert!(!text.contains("blob_"));
        assert!(text.contains("mkdir -p $out/blobs\n"));
        assert_eq!(text.matches("pkgs.fetchurl {").count(), 1);
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render(&recipe(4)), render(&recipe(4)));
    }

    #[test]
    fn nix_string_escapes_specials() {
        assert_eq!(nix_string("plain"), r#""plain""#);
        assert_eq!(nix_string(r#"a"b\c"#), r#""a\"b\\c""#);
        assert_eq!(nix_string("${x}"), r#""\${x}""#);
        assert_eq!(nix_string("$HOME"), r#""$HOME""#);
        assert_eq!(nix_string("a\nb"), r#""a\nb""#);
    }

    #[test]
    fn script_path_leaves_plain_paths_alone() {
        assert_eq!(
            script_path("manifests/registry.ollama.ai/mistral-nemo/latest"),
            "manifests/registry.ollama.ai/mistral-nemo/latest"
        );
        assert_eq!(
            script_path("manifests/127.0.0.1:5000/phi3"),
            "manifests/127.0.0.1:5000/phi3"
        );
    }

    #[test]
    fn script_path_quotes_unusual_paths() {
        assert_eq!(script_path("manifests/r/my model"), "'manifests/r/my model'");
        assert_eq!(script_path("a'b"), r"'a'\'''b'");
        assert_eq!(script_path("x${y}"), "'x''${y}'");
    }

    #[test]
    fn escape_indented_handles_quotes_and_interpolation() {
        assert_eq!(escape_indented("''"), "'''");
        assert_eq!(escape_indented("${a}"), "''${a}");
        assert_eq!(escape_indented("$a"), "$a");
    }
}
