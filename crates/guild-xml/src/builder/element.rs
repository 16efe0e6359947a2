use std::borrow::Cow;

use crate::builder::{escape, is_xml_char, AliasMap, NamespaceWrite, XmlBuilderError};

#[derive(Debug, Clone)]
enum Content<'a> {
    /// Represents a text content within an XML element.
    Text(Cow<'a, str>),
    /// Represents a child element within an XML element.
    Elements(Vec<Element<'a>>),

    None,
}

/// Represents an XML element.
#[derive(Debug, Clone)]
pub struct Element<'a> {
    /// The name of the element.
    name: &'a str,
    /// URL of the namespace the element belongs to.
    namespace: Option<&'a str>,
    /// `xmlns` declarations emitted on this element; a `None` alias declares the default namespace.
    declarations: Vec<(&'a str, Option<&'a str>)>,
    /// The content of the element.
    content: Content<'a>,
}

impl<'a> Element<'a> {
    /// Creates a new instance of `Element` with the given name.
    ///
    /// # Example
    ///
    /// ```
    /// use guild_xml::builder::Element;
    /// let element = Element::new("root");
    /// ```
    pub fn new(name: &'a str) -> Self {
        Element {
            name,
            namespace: None,
            declarations: Vec::new(),
            content: Content::None,
        }
    }

    /// Places the element in the namespace at `url`. It must be declared on
    /// this element or one of its ancestors before the document is written.
    ///
    /// # Example
    ///
    /// ```
    /// use guild_xml::builder::Element;
    /// let element = Element::new("root")
    ///     .set_namespace("http://example.com")
    ///     .add_namespace_declaration("http://example.com", Some("ex"));
    /// assert_eq!(
    ///     element.to_xml_string().unwrap(),
    ///     r#"<ex:root xmlns:ex="http://example.com"/>"#
    /// );
    /// ```
    pub fn set_namespace(mut self, url: &'a str) -> Self {
        self.namespace = Some(url);
        self
    }

    pub fn add_namespace_declaration(mut self, url: &'a str, alias: Option<&'a str>) -> Self {
        self.declarations.push((url, alias));
        self
    }

    /// Adds a child element. Any text content is replaced.
    ///
    /// # Example
    ///
    /// ```
    /// use guild_xml::builder::Element;
    /// let element = Element::new("root").add_child(Element::new("child"));
    /// ```
    pub fn add_child(mut self, child: Element<'a>) -> Self {
        match self.content {
            Content::None | Content::Text(_) => {
                self.content = Content::Elements(vec![child]);
            }
            Content::Elements(ref mut children) => {
                children.push(child);
            }
        }
        self
    }

    pub fn add_children(mut self, children: impl IntoIterator<Item = Element<'a>>) -> Self {
        for child in children {
            self = self.add_child(child);
        }
        self
    }

    /// Sets the text content of the element. Markup characters are escaped on
    /// write; characters XML cannot carry fail the write instead.
    ///
    /// # Example
    ///
    /// ```
    /// use guild_xml::builder::Element;
    /// let element = Element::new("root").set_text("Fish & Chips");
    /// assert_eq!(element.to_xml_string().unwrap(), "<root>Fish &amp; Chips</root>");
    /// ```
    pub fn set_text(mut self, text: impl Into<Cow<'a, str>>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn to_xml_string(&self) -> Result<String, XmlBuilderError> {
        let mut buf = Vec::new();
        self.ns_write(&mut buf, None)?;
        Ok(String::from_utf8(buf)?)
    }

    fn qualified_name(&self, scope: &AliasMap<'a>) -> Result<Cow<'a, str>, XmlBuilderError> {
        let Some(namespace) = self.namespace else {
            return Ok(Cow::Borrowed(self.name));
        };

        match scope.get(namespace) {
            Some(Some(alias)) => Ok(Cow::Owned(format!("{alias}:{}", self.name))),
            Some(None) => Ok(Cow::Borrowed(self.name)),
            None => Err(XmlBuilderError::NamespaceNotDeclared {
                tag: self.name.to_string(),
                ns: namespace.to_string(),
            }),
        }
    }
}

impl<'a> NamespaceWrite<'a> for Element<'a> {
    fn ns_write<W: std::io::Write>(
        &self,
        w: &mut W,
        aliases: Option<&AliasMap<'a>>,
    ) -> Result<(), XmlBuilderError> {
        let scope: Cow<'_, AliasMap<'a>> = if self.declarations.is_empty() {
            aliases.map_or_else(|| Cow::Owned(AliasMap::new()), Cow::Borrowed)
        } else {
            let mut scope = aliases.cloned().unwrap_or_default();
            scope.extend(self.declarations.iter().copied());
            Cow::Owned(scope)
        };

        let name = self.qualified_name(&scope)?;
        w.write_fmt(format_args!("<{name}"))?;

        for (url, alias) in &self.declarations {
            let url = escape(url);
            match alias {
                Some(alias) => w.write_fmt(format_args!(" xmlns:{alias}=\"{url}\""))?,
                None => w.write_fmt(format_args!(" xmlns=\"{url}\""))?,
            }
        }

        match &self.content {
            Content::None => {
                w.write_all(b"/>")?;
            }
            Content::Text(value) => {
                if let Some(character) = value.chars().find(|c| !is_xml_char(*c)) {
                    return Err(XmlBuilderError::InvalidCharacter {
                        tag: self.name.to_string(),
                        character,
                    });
                }
                w.write_fmt(format_args!(">{}</{name}>", escape(value)))?;
            }
            Content::Elements(children) => {
                w.write_all(b">")?;
                for child in children {
                    child.ns_write(w, Some(&scope))?;
                }
                w.write_fmt(format_args!("</{name}>"))?;
            }
        }
        Ok(())
    }
}
