#[cfg(test)]
pub mod common;



#[cfg(test)]
mod test_default_matching;

#[cfg(test)]
mod test_synthesized_entries;



#[cfg(test)]
mod test_builtin_rules;
