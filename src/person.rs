/// A person with a public name and an age which is private to this module.
///
/// Code outside this module can read the age through `Person::age()` but can't change it, and
/// can't call `Person::secret()` at all.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Person {
    pub name: String,
    age: u8,
}

const DEFAULT_AGE: u8 = 18;

impl Person {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            age: DEFAULT_AGE,
        }
    }

    #[inline]
    pub fn age(&self) -> u8 {
        self.age
    }

    fn secret(&self) -> String {
        format!("我的年龄是 {}", self.age)
    }
}

impl std::fmt::Display for Person {
    /// Renders the person's name. The alternate form (`{:#}`) also includes the age.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "{} ({})", self.name, self.secret())
        } else {
            write!(f, "{}", self.name)
        }
    }
}
