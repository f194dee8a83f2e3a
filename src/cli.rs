use crate::error::Error;
use crate::geometry::Point;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgAction, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_region_argument(command);
        let command = Self::register_primary_pixel_argument(command);
        let command = Self::register_secondary_pixel_argument(command);
        Self::register_border_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_region_argument(command: Command) -> Command {
        command.arg(Self::create_region_argument())
    }

    fn register_primary_pixel_argument(command: Command) -> Command {
        command.arg(Self::create_primary_pixel_argument())
    }

    fn register_secondary_pixel_argument(command: Command) -> Command {
        command.arg(Self::create_secondary_pixel_argument())
    }

    fn register_border_argument(command: Command) -> Command {
        command.arg(Self::create_border_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to PNG sprite sheet")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to PNG sprite output file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_region_argument() -> Arg {
        arg!(region: -r --region <CORNERS> "Region of interest as X0,Y0,X1,Y1 in image coordinates")
            .required(true)
            .value_parser(parse_region_argument)
    }

    fn create_primary_pixel_argument() -> Arg {
        arg!(primary_pixel: -p --primary_pixel <PIXEL> "Pixel to sample the primary background color from, as X,Y")
            .required(true)
            .value_parser(parse_pixel_argument)
    }

    fn create_secondary_pixel_argument() -> Arg {
        arg!(secondary_pixel: -s --secondary_pixel <PIXEL> "Pixel to sample the secondary color from, keyed to transparent, as X,Y")
            .required(false)
            .value_parser(parse_pixel_argument)
    }

    fn create_border_argument() -> Arg {
        arg!(border: -b --border "Wrap the sprite in a one pixel transparent border")
            .action(ArgAction::SetTrue)
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            region: Self::extract_region_argument(matches),
            primary_pixel: Self::extract_primary_pixel_argument(matches),
            secondary_pixel: Self::extract_secondary_pixel_argument(matches),
            border: Self::extract_border_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Required argument output_file not provided")
            .clone()
    }

    fn extract_region_argument(matches: &ArgMatches) -> (Point, Point) {
        matches
            .get_one::<(Point, Point)>("region")
            .expect("Required argument region not provided")
            .to_owned()
    }

    fn extract_primary_pixel_argument(matches: &ArgMatches) -> Point {
        matches
            .get_one::<Point>("primary_pixel")
            .expect("Required argument primary_pixel not provided")
            .to_owned()
    }

    fn extract_secondary_pixel_argument(matches: &ArgMatches) -> Option<Point> {
        matches.get_one::<Point>("secondary_pixel").copied()
    }

    fn extract_border_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("border")
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_coordinate_list(raw: &str, expected: usize) -> crate::Result<Vec<i32>> {
    let components: Vec<&str> = raw.split(',').collect();
    if components.len() != expected {
        return Err(Error::MalformedCoordinatePair(raw.to_owned()));
    }
    components
        .iter()
        .map(|component| {
            component
                .trim()
                .parse::<i32>()
                .map_err(|_| Error::MalformedCoordinatePair(raw.to_owned()))
        })
        .collect()
}

fn parse_pixel_argument(raw: &str) -> Result<Point, String> {
    let values = parse_coordinate_list(raw, 2).map_err(|e| e.to_string())?;
    Ok(Point::new(values[0], values[1]))
}

fn parse_region_argument(raw: &str) -> Result<(Point, Point), String> {
    let values = parse_coordinate_list(raw, 4).map_err(|e| e.to_string())?;
    Ok((
        Point::new(values[0], values[1]),
        Point::new(values[2], values[3]),
    ))
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Command};

    use super::{CLIParser, Point};

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    #[test]
    fn parse_input_file_argument() {
        let input_file_name = "sheet.png";
        let command = Command::new("test");
        let command = CLIParser::register_input_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, input_file_name]);
        let input_file = CLIParser::extract_input_file_argument(&matches);
        assert_eq!(input_file.file_name().unwrap(), input_file_name);
    }

    #[test]
    fn parse_output_file_argument() {
        let output_file_name = "sprite.png";
        let command = Command::new("test");
        let command = CLIParser::register_output_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, output_file_name]);
        let output_file = CLIParser::extract_output_file_argument(&matches);
        assert_eq!(output_file.file_name().unwrap(), output_file_name);
    }

    #[test]
    fn parse_region_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_region_argument(command);
        let matches =
            command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--region", "4,2,10,8"]);
        let (a, b) = CLIParser::extract_region_argument(&matches);
        assert_eq!(a, Point::new(4, 2), "first corner is wrong");
        assert_eq!(b, Point::new(10, 8), "second corner is wrong");
    }

    #[test]
    fn parse_region_argument_with_too_few_components() {
        let command = Command::new("test");
        let command = CLIParser::register_region_argument(command);
        let result =
            command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--region", "4,2,10"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        } else {
            panic!("Region with three components not detected");
        }
    }

    #[test]
    fn parse_primary_pixel_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_primary_pixel_argument(command);
        let matches =
            command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--primary_pixel", "0,15"]);
        let pixel = CLIParser::extract_primary_pixel_argument(&matches);
        assert_eq!(pixel, Point::new(0, 15));
    }

    #[test]
    fn parse_primary_pixel_illegal_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_primary_pixel_argument(command);
        let result =
            command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--primary_pixel", "0,red"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        } else {
            panic!("Illegal value for primary_pixel not detected");
        }
    }

    #[test]
    fn parse_secondary_pixel_argument_is_optional() {
        let command = Command::new("test");
        let command = CLIParser::register_secondary_pixel_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT]);
        let pixel = CLIParser::extract_secondary_pixel_argument(&matches);
        assert_eq!(pixel, None, "absent secondary pixel must stay None");
    }

    #[test]
    fn parse_border_argument_defaults_to_false() {
        let command = Command::new("test");
        let command = CLIParser::register_border_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT]);
        assert!(!CLIParser::extract_border_argument(&matches));
        let command = Command::new("test");
        let command = CLIParser::register_border_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--border"]);
        assert!(CLIParser::extract_border_argument(&matches));
    }

    #[test]
    fn parse_required_arguments_only() {
        let input_file_name = "sheet.png";
        let input_file_path = format!("/input_directory/{}", input_file_name);
        let output_file_name = "sprite.png";
        let output_file_path = format!("/output_directory/{}", output_file_name);
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![
            PROGRAM_NAME_ARGUMENT,
            &input_file_path,
            &output_file_path,
            "--region",
            "0,0,16,16",
            "--primary_pixel",
            "0,0",
        ]);
        assert_eq!(
            arguments.input_file.file_name().unwrap(),
            input_file_name,
            "input file does not match"
        );
        assert_eq!(
            arguments.output_file.file_name().unwrap(),
            output_file_name,
            "output file does not match"
        );
        assert_eq!(
            arguments.region,
            (Point::new(0, 0), Point::new(16, 16)),
            "region does not match"
        );
        assert_eq!(
            arguments.primary_pixel,
            Point::new(0, 0),
            "primary_pixel does not match"
        );
        assert_eq!(
            arguments.secondary_pixel, None,
            "secondary_pixel does not match"
        );
        assert!(!arguments.border, "border does not match");
    }
}
