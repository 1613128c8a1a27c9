use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn run_cmd(db_path: &Path, args: &[&str]) -> String {
    let output = cargo_bin_cmd!("farmhand")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(db_path: &Path, args: &[&str]) -> Value {
    let output = cargo_bin_cmd!("farmhand")
        .args(["--db-path", db_path.to_str().expect("db path"), "--json"])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

#[test]
fn cli_add_list_filter_flow() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("farmhand.sqlite3");

    run_cmd(
        &db_path,
        &[
            "add-buyer",
            "--fname",
            "John",
            "--lname",
            "Smith",
            "--email",
            "john@example.com",
            "--score",
            "92",
            "--vip",
            "--tag",
            "Cash Buyer",
        ],
    );
    run_cmd(
        &db_path,
        &["add-buyer", "--fname", "Grace", "--score", "40"],
    );

    let all = run_cmd_json(&db_path, &["list"]);
    assert_eq!(all.as_array().expect("array").len(), 2);

    let vips = run_cmd_json(&db_path, &["list", "--vip", "yes"]);
    let vips = vips.as_array().expect("array");
    assert_eq!(vips.len(), 1);
    assert_eq!(vips[0]["display_name"], "John Smith");
    let id = vips[0]["id"].as_str().expect("id").to_string();

    // Substring tag matching: "cash" hits "Cash Buyer".
    let tagged = run_cmd_json(&db_path, &["list", "--tag", "cash"]);
    assert_eq!(tagged.as_array().expect("array").len(), 1);

    let excluded = run_cmd_json(&db_path, &["list", "--exclude-tag", "cash"]);
    assert_eq!(excluded.as_array().expect("array").len(), 1);

    let high = run_cmd_json(&db_path, &["list", "--min-score", "80"]);
    assert_eq!(high.as_array().expect("array").len(), 1);

    let group = run_cmd_json(&db_path, &["list", "--group", "cash-buyer"]);
    assert_eq!(group.as_array().expect("array").len(), 1);

    run_cmd(&db_path, &["tag", "rm", &id, "Cash Buyer"]);
    let tagged = run_cmd_json(&db_path, &["list", "--tag", "cash"]);
    assert_eq!(tagged.as_array().expect("array").len(), 0);
}

#[test]
fn cli_import_template_roundtrip() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("farmhand.sqlite3");
    let csv_path = temp.path().join("buyers.csv");

    let template = run_cmd(&db_path, &["import", "template"]);
    let header = template.trim_end();
    assert!(header.starts_with("First Name,Last Name,Email"));

    let mut data = String::from(header);
    data.push('\n');
    data.push_str("Ann,Lee,ann@example.com,555-0101,,,Acme,88,,,,,,\"Austin, TX\",\"Investor;Cash Buyer\",yes,Yes,1,true,Condo,100000,250000,3-6 months,Referral,qualified\n");
    data.push_str("Bob,Ray,bob@example.com,555-0102,,,,,,,,,,,,,,,,,,,,,\n");
    fs::write(&csv_path, data).expect("write csv");

    let stdout = run_cmd(
        &db_path,
        &["import", "csv", csv_path.to_str().expect("path"), "--auto-map"],
    );
    assert!(stdout.contains("Imported 2 of 2 rows"));

    let all = run_cmd_json(&db_path, &["list"]);
    let all = all.as_array().expect("array");
    assert_eq!(all.len(), 2);

    let ann = all
        .iter()
        .find(|item| item["display_name"] == "Ann Lee")
        .expect("ann imported");
    assert_eq!(ann["score"], 88);
    assert_eq!(ann["status"], "qualified");
    assert_eq!(ann["vip"], true);

    // Unmapped/empty cells fall back to defaults.
    let bob = all
        .iter()
        .find(|item| item["display_name"] == "Bob Ray")
        .expect("bob imported");
    assert_eq!(bob["score"], 0);
    assert_eq!(bob["status"], "lead");

    let dashboard = run_cmd_json(&db_path, &["dashboard"]);
    assert_eq!(dashboard["total_buyers"], 2);
    assert_eq!(dashboard["smart_groups"]["vip"], 1);
    assert_eq!(dashboard["smart_groups"]["cash_buyer"], 1);
}

#[test]
fn cli_groups_flow() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("farmhand.sqlite3");

    run_cmd(&db_path, &["add-buyer", "--fname", "Ada"]);
    let buyers = run_cmd_json(&db_path, &["list"]);
    let buyer_id = buyers.as_array().expect("array")[0]["id"]
        .as_str()
        .expect("id")
        .to_string();

    let group = run_cmd_json(&db_path, &["group", "create", "--name", "Hot List"]);
    let group_id = group["id"].as_str().expect("group id").to_string();

    run_cmd(&db_path, &["group", "add-buyers", &group_id, &buyer_id]);

    let groups = run_cmd_json(&db_path, &["group", "ls"]);
    let groups = groups.as_array().expect("array");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["members"], 1);

    let detail = run_cmd_json(&db_path, &["show", &buyer_id]);
    assert_eq!(detail["groups"][0], "Hot List");
}

#[test]
fn cli_import_without_mapping_is_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("farmhand.sqlite3");
    let csv_path = temp.path().join("buyers.csv");
    fs::write(&csv_path, "Email\nann@example.com\n").expect("write csv");

    let output = cargo_bin_cmd!("farmhand")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(["import", "csv", csv_path.to_str().expect("path")])
        .output()
        .expect("run command");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(3));
}
