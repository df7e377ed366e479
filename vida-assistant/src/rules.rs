//! Keyword rules used whenever no remote reply is available.
//!
//! Rules are checked in order against the lowercased input and the first
//! rule with a matching keyword wins. There is no scoring: a message that
//! mentions both affiliation and volunteering gets the affiliation answer.

/// The canned topic a rule answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Affiliation,
    Volunteering,
    Documents,
    Events,
    Contact,
}

/// A keyword group paired with its canned response.
#[derive(Debug, Clone)]
pub struct Rule {
    pub intent: Intent,
    /// Lowercase substrings; any one of them selects the rule.
    pub keywords: Vec<String>,
    pub response: String,
}

impl Rule {
    pub fn new<K, I>(intent: Intent, keywords: I, response: impl Into<String>) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = K>,
    {
        Self {
            intent,
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
            response: response.into(),
        }
    }

    /// `lowered` must already be lowercase.
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

const AFFILIATION_RESPONSE: &str = "\
¡Excelente! Para **afiliarte** a VIDA NL:
1) Ve a la sección **Afíliate** del sitio (/afiliate).
2) Completa el formulario con tu nombre completo, CURP, domicilio y un teléfono de contacto.
3) Confirma tu registro por correo.
4) Te contactaremos con los siguientes pasos.";

const VOLUNTEERING_RESPONSE: &str = "\
¡Gracias por tu interés en el **voluntariado**!
Tenemos roles en eventos, formación ciudadana y apoyo territorial.
¿En qué área te gustaría participar? También puedo tomar tus datos para ponerte en contacto con el equipo.";

const DOCUMENTS_RESPONSE: &str = "\
Puedes consultar los **Documentos** oficiales (estatutos, lineamientos y aviso de privacidad) desde el menú principal.
¿Buscas algún documento específico?";

const EVENTS_RESPONSE: &str = "\
Nuestros **próximos eventos** se publican en la sección de Noticias/Eventos.
¿Te comparto los más cercanos a tu municipio? Dime tu municipio y fecha aproximada.";

const CONTACT_RESPONSE: &str = "\
Puedo canalizarte con el equipo correspondiente desde la sección **Contacto**.
¿Prefieres **WhatsApp** o **correo**? Compárteme tu número o email, y tu municipio.";

const CLARIFYING_RESPONSE: &str = "\
Entendido. ¿Podrías darme más contexto? Puedo ayudarte con afiliación, voluntariado, documentos, eventos o contacto con el equipo.";

/// An ordered list of rules plus the catch-all answer.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    fallback: String,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// The site's canned answers.
    pub fn builtin() -> Self {
        Self::new(
            vec![
                Rule::new(Intent::Affiliation, ["afili", "afíli"], AFFILIATION_RESPONSE),
                Rule::new(Intent::Volunteering, ["volunt"], VOLUNTEERING_RESPONSE),
                Rule::new(
                    Intent::Documents,
                    ["document", "pdf", "estatuto", "lineamiento"],
                    DOCUMENTS_RESPONSE,
                ),
                Rule::new(
                    Intent::Events,
                    ["evento", "agenda", "fecha"],
                    EVENTS_RESPONSE,
                ),
                Rule::new(
                    Intent::Contact,
                    [
                        "contacto", "teléfono", "telefono", "whatsapp", "correo", "email",
                    ],
                    CONTACT_RESPONSE,
                ),
            ],
            CLARIFYING_RESPONSE,
        )
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Returns the intent of the first matching rule.
    pub fn classify(&self, input: &str) -> Option<Intent> {
        self.first_match(input).map(|rule| rule.intent)
    }

    /// Returns the canned response for `input`, or the clarifying fallback.
    pub fn respond(&self, input: &str) -> &str {
        self.first_match(input)
            .map(|rule| rule.response.as_str())
            .unwrap_or(&self.fallback)
    }

    fn first_match(&self, input: &str) -> Option<&Rule> {
        let lowered = input.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}
