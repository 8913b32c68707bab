use crate::cli::GenerateArgs;
use crate::generator::{generate_password, CharacterSets};

pub fn handle_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let sets = CharacterSets {
        lowercase: !args.no_lowercase,
        uppercase: !args.no_uppercase,
        digits: !args.no_digits,
        special: !args.no_special,
        space: args.space,
        brackets: args.brackets,
    };
    let password = generate_password(args.length, &sets)?;
    println!("{}", password.as_str());
    Ok(())
}
