use predicates::str;
use rstest::rstest;
use test_utilities::*;

#[test]
fn command() {
	geoinfra_cmd()
		.assert()
		.failure()
		.code(2)
		.stdout(str::is_empty())
		.stderr(str::contains(format!("Usage: {BINARY_NAME} [OPTIONS] <COMMAND>")));
}

#[rstest]
#[case("check", "[OPTIONS] <FILE>")]
fn subcommand(#[case] sub_command: &str, #[case] usage: &str) {
	geoinfra_cmd()
		.args(sub_command.split(' '))
		.assert()
		.failure()
		.code(2)
		.stdout(str::is_empty())
		.stderr(str::contains(format!("Usage: {BINARY_NAME} {sub_command} {usage}")));
}

#[rstest]
#[case("serve --help", "[OPTIONS]")]
#[case("load --help", "[OPTIONS] [BASE]")]
fn subcommand_help(#[case] sub_command: &str, #[case] usage: &str) {
	let name = sub_command.split(' ').next().unwrap();
	geoinfra_cmd()
		.args(sub_command.split(' '))
		.assert()
		.success()
		.stdout(str::contains(format!("Usage: {BINARY_NAME} {name} {usage}")));
}
