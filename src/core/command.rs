use std::fmt;

/// Ordered CLI tokens scoped to one input, one output, or the global position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet(Vec<String>);

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: impl Into<String>) -> &mut Self {
        self.0.push(token.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for OptionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for OptionSet {
    fn from(tokens: [S; N]) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<Vec<String>> for OptionSet {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

/// Everything needed to produce one argv for the external tool.
///
/// Inputs and outputs keep insertion order; a path is stored at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    pub program: String,
    pub globals: OptionSet,
    inputs: Vec<(String, OptionSet)>,
    outputs: Vec<(String, OptionSet)>,
}

impl InvocationSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            globals: OptionSet::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn global(mut self, options: impl Into<OptionSet>) -> Self {
        self.globals = options.into();
        self
    }

    /// Adds an input. An already present path keeps its slot and gets the new options.
    pub fn input(mut self, path: impl Into<String>, options: impl Into<OptionSet>) -> Self {
        upsert(&mut self.inputs, path.into(), options.into());
        self
    }

    pub fn output(mut self, path: impl Into<String>, options: impl Into<OptionSet>) -> Self {
        upsert(&mut self.outputs, path.into(), options.into());
        self
    }

    pub fn inputs(&self) -> &[(String, OptionSet)] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[(String, OptionSet)] {
        &self.outputs
    }

    /// Tool arguments without the program token.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        args.extend(self.globals.tokens().iter().cloned());

        for (path, options) in &self.inputs {
            args.push("-i".to_string());
            args.push(path.clone());
            args.extend(options.tokens().iter().cloned());
        }

        for (path, options) in &self.outputs {
            args.extend(options.tokens().iter().cloned());
            args.push(path.clone());
        }

        args
    }

    /// Full argv, program token first.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = vec![self.program.clone()];
        argv.extend(self.to_args());
        argv
    }
}

impl fmt::Display for InvocationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_words::join(self.argv()))
    }
}

fn upsert(entries: &mut Vec<(String, OptionSet)>, path: String, options: OptionSet) {
    match entries.iter_mut().find(|(existing, _)| *existing == path) {
        Some((_, slot)) => *slot = options,
        None => entries.push((path, options)),
    }
}

/// Assembles an argv from the three option groups.
pub fn build<I, O>(program: &str, globals: OptionSet, inputs: I, outputs: O) -> Vec<String>
where
    I: IntoIterator<Item = (String, OptionSet)>,
    O: IntoIterator<Item = (String, OptionSet)>,
{
    let mut spec = InvocationSpec::new(program).global(globals);
    for (path, options) in inputs {
        spec = spec.input(path, options);
    }
    for (path, options) in outputs {
        spec = spec.output(path, options);
    }
    spec.argv()
}
