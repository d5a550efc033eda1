//! End-to-end tests running the `trpc-swift` binary.

#![allow(non_snake_case)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const DEFINITION: &str = r#"{
    "definitions": {
        "User": {
            "kind": "object",
            "fields": {
                "id": {"kind": "string"},
                "createdAt": {"kind": "date"}
            }
        }
    },
    "router": {
        "children": {
            "users": {
                "type": "router",
                "children": {
                    "get": {
                        "type": "procedure",
                        "kind": "query",
                        "input": {"kind": "string"},
                        "output": {"kind": "ref", "id": "User"}
                    },
                    "create": {
                        "type": "procedure",
                        "kind": "mutation",
                        "input": {"kind": "ref", "id": "User"}
                    }
                }
            }
        }
    }
}"#;

fn trpc_swift(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_trpc-swift"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("api.json"), DEFINITION).unwrap();
    fs::write(
        dir.path().join("trpc-swift.toml"),
        "[client]\nname = \"API\"\ninput = \"api.json\"\noutput = \"Sources/API.swift\"\n\n[flags]\npublic_access = true\n",
    )
    .unwrap();
    dir
}

mod generate_command {
    use super::*;

    #[test]
    fn generate___default_manifest___writes_client() {
        let dir = project();

        let output = trpc_swift(dir.path(), &["generate"]);

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let swift = fs::read_to_string(dir.path().join("Sources/API.swift")).unwrap();
        assert!(swift.contains("public class API: TRPCClientData {"));
        assert!(swift.contains("public func get(input: String) async throws -> User {"));
        assert!(swift.contains("func create(input: User) async throws -> TRPCClient.EmptyObject {"));
    }

    #[test]
    fn generate___arguments_without_manifest___writes_client() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("api.json"), DEFINITION).unwrap();

        let output = trpc_swift(
            dir.path(),
            &["generate", "-i", "api.json", "-n", "Backend", "-o", "Backend.swift", "--type-aliases"],
        );

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let swift = fs::read_to_string(dir.path().join("Backend.swift")).unwrap();
        assert!(swift.contains("typealias User = Backend.User"));
    }

    #[test]
    fn generate___dry_run___prints_instead_of_writing() {
        let dir = project();

        let output = trpc_swift(dir.path(), &["generate", "--dry-run"]);

        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("class UsersRoute: TRPCClientData {"));
        assert!(!dir.path().join("Sources/API.swift").exists());
    }

    #[test]
    fn generate___invalid_definition___fails_with_message() {
        let dir = project();
        fs::write(dir.path().join("api.json"), "[]").unwrap();

        let output = trpc_swift(dir.path(), &["generate"]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("api.json"));
        assert!(!dir.path().join("Sources/API.swift").exists());
    }

    #[test]
    fn generate___unknown_reference___exits_with_error_code() {
        let dir = project();
        fs::write(
            dir.path().join("api.json"),
            r#"{"router":{"children":{"get":{"type":"procedure","kind":"query","output":{"kind":"ref","id":"Missing"}}}}}"#,
        )
        .unwrap();

        let output = trpc_swift(dir.path(), &["generate"]);

        assert_eq!(output.status.code(), Some(12));
        assert!(String::from_utf8_lossy(&output.stderr).contains("Missing"));
    }

    #[test]
    fn generate___reserved_client_name___fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("api.json"), DEFINITION).unwrap();

        let output = trpc_swift(
            dir.path(),
            &["generate", "-i", "api.json", "-n", "TRPCClient", "-o", "Client.swift"],
        );

        assert_eq!(output.status.code(), Some(15));
        assert!(!dir.path().join("Client.swift").exists());
    }
}

mod check_command {
    use super::*;

    #[test]
    fn check___reports_counts() {
        let dir = project();

        let output = trpc_swift(dir.path(), &["check"]);

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(stdout.contains("Routers: 1"));
        assert!(stdout.contains("Procedures: 2"));
        assert!(stdout.contains("Models: 1"));
    }

    #[test]
    fn check___missing_manifest___fails() {
        let dir = TempDir::new().unwrap();

        let output = trpc_swift(dir.path(), &["check"]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("trpc-swift.toml"));
    }
}
