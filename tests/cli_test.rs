use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("crypticvalley"));
    cmd.arg("tests/fixtures/lunch.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("line,item,price"))
        .stdout(predicate::str::contains("1,Paneer Butter Masala,0.0100"))
        .stdout(predicate::str::contains("2,Gobi Paratha,0.0001"))
        .stdout(predicate::str::contains("Aloo Paratha").not())
        .stdout(predicate::str::contains(
            "0.0101,excellent,0.0111,initial,",
        ));

    Ok(())
}

#[test]
fn test_cli_custom_menu_and_config() -> Result<(), Box<dyn std::error::Error>> {
    let script = tempfile::NamedTempFile::new()?;
    std::fs::write(script.path(), "action,value\nadd,Mango Lassi\ntip,20\npay,\n")?;

    let mut cmd = Command::new(cargo_bin!("crypticvalley"));
    cmd.arg(script.path())
        .arg("--menu")
        .arg("tests/fixtures/menu.csv")
        .arg("--config")
        .arg("tests/fixtures/sepolia.json");

    // 0.0015 * 1.2 paid on the configured chain, order reset
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.0000,none,0.0000,initial,0.0018"));

    Ok(())
}

#[test]
fn test_cli_invalid_menu_fails() -> Result<(), Box<dyn std::error::Error>> {
    let menu = tempfile::NamedTempFile::new()?;
    std::fs::write(menu.path(), "name,price\nMasala Dosa,-0.004\n")?;

    let mut cmd = Command::new(cargo_bin!("crypticvalley"));
    cmd.arg("tests/fixtures/lunch.csv").arg("--menu").arg(menu.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Masala Dosa"));

    Ok(())
}
