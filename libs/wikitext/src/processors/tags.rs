/// Tag list as written in a page header, either `[one, two words]` or `one two`.
pub struct TagsArray<'a> {
    pub values: Vec<&'a str>,
}

impl<'a> TagsArray<'a> {
    pub fn new(tag_str: &'a str) -> Self {
        let tag_str = tag_str.trim();
        match tag_str
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            Some(inner) => TagsArray {
                values: inner
                    .split(',')
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            None => TagsArray {
                values: tag_str.split_whitespace().collect(),
            },
        }
    }

    pub fn to_owned_vec(&self) -> Vec<String> {
        self.values.iter().map(|t| t.to_string()).collect()
    }
}

pub fn tag_string_from_vec<S: AsRef<str>>(tags: &[S]) -> String {
    let mut tag_string = tags
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<&str>>()
        .join(",");
    tag_string.push(']');
    tag_string.insert(0, '[');
    tag_string
}
