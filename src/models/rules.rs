use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Document categories an MRZ type code can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    AditStamp,
    AlienRegistration,
    BirthCertificate,
    BorderCrossingCard,
    Cedula,
    CertificateOfNaturalization,
    CitizenshipCard,
    DriversLicense,
    Dsp150Form,
    EmployeeAuthorization,
    GovernmentIssuedId,
    I512,
    I551,
    I94,
    InterpolNotice,
    MilitaryCard,
    NationalId,
    Other,
    Passport,
    ReentryPermit,
    RefugeePermit,
    RefugeeTravelDocument,
    RefugeeAsylee,
    TransportationLetter,
    TribalCard,
    TrustedTravelerCard,
    Visa,
    VoterRegistration,
}

pub struct DocumentTypeEntry {
    pub document_type: DocumentType,
    pub name: &'static str,
    pub codes: &'static [&'static str],
}

// Entries without codes never come out of an MRZ; they exist so every
// document type has a display name.
static DOCUMENT_TYPES: &[DocumentTypeEntry] = &[
    DocumentTypeEntry { document_type: DocumentType::Passport, name: "Passport", codes: &["P", "IP", "PO"] },
    DocumentTypeEntry { document_type: DocumentType::BirthCertificate, name: "Birth Certificate", codes: &["BC"] },
    DocumentTypeEntry { document_type: DocumentType::NationalId, name: "National ID", codes: &["NI"] },
    DocumentTypeEntry { document_type: DocumentType::DriversLicense, name: "Drivers License", codes: &["DL"] },
    DocumentTypeEntry { document_type: DocumentType::Other, name: "Other", codes: &["O"] },
    DocumentTypeEntry { document_type: DocumentType::NationalId, name: "Social Security Card", codes: &["SS"] },
    DocumentTypeEntry { document_type: DocumentType::GovernmentIssuedId, name: "ID Card", codes: &["I", "ID"] },
    DocumentTypeEntry { document_type: DocumentType::Visa, name: "Visa", codes: &["V", "VN", "VB", "IV"] },
    DocumentTypeEntry { document_type: DocumentType::AlienRegistration, name: "A Number", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::EmployeeAuthorization, name: "Employment Authorization Document", codes: &["EAD", "IA"] },
    DocumentTypeEntry { document_type: DocumentType::VoterRegistration, name: "Voter Registration Card", codes: &["VR"] },
    DocumentTypeEntry { document_type: DocumentType::TribalCard, name: "Tribal Card", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::RefugeeAsylee, name: "Refugee Asylee Card", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::RefugeeTravelDocument, name: "Refugee Travel Document", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::RefugeePermit, name: "Refugee Permit", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::ReentryPermit, name: "Re-Entry Permit", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::MilitaryCard, name: "Military Card", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::I94, name: "I94", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::I551, name: "I551", codes: &["A", "AR", "A1", "A2", "C1", "C2"] },
    DocumentTypeEntry { document_type: DocumentType::Cedula, name: "CEDULA", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::AditStamp, name: "ADIT Stamp", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::BorderCrossingCard, name: "Border Crossing Card", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::CertificateOfNaturalization, name: "Certificate of Naturalization", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::CitizenshipCard, name: "Citizenship Card", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::Dsp150Form, name: "DSP-150 Form", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::I512, name: "I512", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::InterpolNotice, name: "Interpol Notice", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::TransportationLetter, name: "Transportation Letter", codes: &[] },
    DocumentTypeEntry { document_type: DocumentType::TrustedTravelerCard, name: "Trusted Traveler Card", codes: &[] },
];

impl DocumentType {
    /// Resolve an MRZ document code (`P`, `ID`, `V`, ...) to a document type.
    pub fn from_code(code: &str) -> Option<DocumentType> {
        DOCUMENT_TYPES
            .iter()
            .find(|entry| entry.codes.contains(&code))
            .map(|entry| entry.document_type)
    }

    /// Human readable name. Types sharing a variant report the first entry.
    pub fn display_name(&self) -> &'static str {
        DOCUMENT_TYPES
            .iter()
            .find(|entry| entry.document_type == *self)
            .map(|entry| entry.name)
            .unwrap_or("Unknown")
    }
}

/// Display name for an MRZ sex marker.
pub fn gender_display_name(gender: char) -> &'static str {
    match gender {
        'M' => "MALE",
        'F' => "FEMALE",
        _ => "Unknown",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub alpha3: &'static str,
    /// ISO 3166 numeric code; `None` for ICAO-only codes.
    pub numeric: Option<&'static str>,
    pub name: &'static str,
}

/// Country and nationality codes accepted in an MRZ: ISO 3166-1 alpha-3 plus
/// the ICAO 9303 additions (organisations, stateless persons, specimens).
pub struct CountryCodes {
    countries: HashMap<&'static str, Country>,
}

impl CountryCodes {
    pub fn new() -> Self {
        let mut countries = HashMap::with_capacity(ISO_COUNTRIES.len() + ICAO_CODES.len());

        for &(alpha3, numeric, name) in ISO_COUNTRIES {
            countries.insert(
                alpha3,
                Country {
                    alpha3,
                    numeric: Some(numeric),
                    name,
                },
            );
        }
        for &(alpha3, name) in ICAO_CODES {
            countries.insert(
                alpha3,
                Country {
                    alpha3,
                    numeric: None,
                    name,
                },
            );
        }

        CountryCodes { countries }
    }

    pub fn get(&self, alpha3: &str) -> Option<&Country> {
        self.countries.get(alpha3)
    }
}

impl Default for CountryCodes {
    fn default() -> Self {
        Self::new()
    }
}

static ICAO_CODES: &[(&str, &str)] = &[
    ("GBD", "British Overseas Territories Citizen"),
    ("GBN", "British National (Overseas)"),
    ("GBO", "British Overseas Citizen"),
    ("GBP", "British Protected Person"),
    ("GBS", "British Subject"),
    ("UNO", "United Nations Organization"),
    ("UNA", "United Nations Specialized Agency"),
    ("UNK", "Resident of Kosovo (UNMIK)"),
    ("RKS", "Kosovo"),
    ("EUE", "European Union"),
    ("XOM", "Sovereign Military Order of Malta"),
    ("XPO", "Interpol"),
    ("XCC", "Caribbean Community"),
    ("XES", "Organisation of Eastern Caribbean States"),
    ("XBA", "African Development Bank"),
    ("XIM", "African Export-Import Bank"),
    ("XCE", "Council of Europe"),
    ("XEC", "Economic Community of West African States"),
    ("XXA", "Stateless Person"),
    ("XXB", "Refugee (1951 Convention)"),
    ("XXC", "Refugee (other)"),
    ("XXX", "Unspecified Nationality"),
    ("UTO", "Utopia"),
];

static ISO_COUNTRIES: &[(&str, &str, &str)] = &[
    ("AFG", "004", "Afghanistan"),
    ("ALA", "248", "Aland Islands"),
    ("ALB", "008", "Albania"),
    ("DZA", "012", "Algeria"),
    ("ASM", "016", "American Samoa"),
    ("AND", "020", "Andorra"),
    ("AGO", "024", "Angola"),
    ("AIA", "660", "Anguilla"),
    ("ATA", "010", "Antarctica"),
    ("ATG", "028", "Antigua and Barbuda"),
    ("ARG", "032", "Argentina"),
    ("ARM", "051", "Armenia"),
    ("ABW", "533", "Aruba"),
    ("AUS", "036", "Australia"),
    ("AUT", "040", "Austria"),
    ("AZE", "031", "Azerbaijan"),
    ("BHS", "044", "Bahamas"),
    ("BHR", "048", "Bahrain"),
    ("BGD", "050", "Bangladesh"),
    ("BRB", "052", "Barbados"),
    ("BLR", "112", "Belarus"),
    ("BEL", "056", "Belgium"),
    ("BLZ", "084", "Belize"),
    ("BEN", "204", "Benin"),
    ("BMU", "060", "Bermuda"),
    ("BTN", "064", "Bhutan"),
    ("BOL", "068", "Bolivia"),
    ("BES", "535", "Bonaire, Sint Eustatius and Saba"),
    ("BIH", "070", "Bosnia and Herzegovina"),
    ("BWA", "072", "Botswana"),
    ("BVT", "074", "Bouvet Island"),
    ("BRA", "076", "Brazil"),
    ("IOT", "086", "British Indian Ocean Territory"),
    ("BRN", "096", "Brunei Darussalam"),
    ("BGR", "100", "Bulgaria"),
    ("BFA", "854", "Burkina Faso"),
    ("BDI", "108", "Burundi"),
    ("CPV", "132", "Cabo Verde"),
    ("KHM", "116", "Cambodia"),
    ("CMR", "120", "Cameroon"),
    ("CAN", "124", "Canada"),
    ("CYM", "136", "Cayman Islands"),
    ("CAF", "140", "Central African Republic"),
    ("TCD", "148", "Chad"),
    ("CHL", "152", "Chile"),
    ("CHN", "156", "China"),
    ("CXR", "162", "Christmas Island"),
    ("CCK", "166", "Cocos (Keeling) Islands"),
    ("COL", "170", "Colombia"),
    ("COM", "174", "Comoros"),
    ("COG", "178", "Congo"),
    ("COD", "180", "Congo, Democratic Republic of the"),
    ("COK", "184", "Cook Islands"),
    ("CRI", "188", "Costa Rica"),
    ("CIV", "384", "Cote d'Ivoire"),
    ("HRV", "191", "Croatia"),
    ("CUB", "192", "Cuba"),
    ("CUW", "531", "Curacao"),
    ("CYP", "196", "Cyprus"),
    ("CZE", "203", "Czechia"),
    ("DNK", "208", "Denmark"),
    ("DJI", "262", "Djibouti"),
    ("DMA", "212", "Dominica"),
    ("DOM", "214", "Dominican Republic"),
    ("ECU", "218", "Ecuador"),
    ("EGY", "818", "Egypt"),
    ("SLV", "222", "El Salvador"),
    ("GNQ", "226", "Equatorial Guinea"),
    ("ERI", "232", "Eritrea"),
    ("EST", "233", "Estonia"),
    ("SWZ", "748", "Eswatini"),
    ("ETH", "231", "Ethiopia"),
    ("FLK", "238", "Falkland Islands (Malvinas)"),
    ("FRO", "234", "Faroe Islands"),
    ("FJI", "242", "Fiji"),
    ("FIN", "246", "Finland"),
    ("FRA", "250", "France"),
    ("GUF", "254", "French Guiana"),
    ("PYF", "258", "French Polynesia"),
    ("ATF", "260", "French Southern Territories"),
    ("GAB", "266", "Gabon"),
    ("GMB", "270", "Gambia"),
    ("GEO", "268", "Georgia"),
    ("DEU", "276", "Germany"),
    ("GHA", "288", "Ghana"),
    ("GIB", "292", "Gibraltar"),
    ("GRC", "300", "Greece"),
    ("GRL", "304", "Greenland"),
    ("GRD", "308", "Grenada"),
    ("GLP", "312", "Guadeloupe"),
    ("GUM", "316", "Guam"),
    ("GTM", "320", "Guatemala"),
    ("GGY", "831", "Guernsey"),
    ("GIN", "324", "Guinea"),
    ("GNB", "624", "Guinea-Bissau"),
    ("GUY", "328", "Guyana"),
    ("HTI", "332", "Haiti"),
    ("HMD", "334", "Heard Island and McDonald Islands"),
    ("VAT", "336", "Holy See"),
    ("HND", "340", "Honduras"),
    ("HKG", "344", "Hong Kong"),
    ("HUN", "348", "Hungary"),
    ("ISL", "352", "Iceland"),
    ("IND", "356", "India"),
    ("IDN", "360", "Indonesia"),
    ("IRN", "364", "Iran"),
    ("IRQ", "368", "Iraq"),
    ("IRL", "372", "Ireland"),
    ("IMN", "833", "Isle of Man"),
    ("ISR", "376", "Israel"),
    ("ITA", "380", "Italy"),
    ("JAM", "388", "Jamaica"),
    ("JPN", "392", "Japan"),
    ("JEY", "832", "Jersey"),
    ("JOR", "400", "Jordan"),
    ("KAZ", "398", "Kazakhstan"),
    ("KEN", "404", "Kenya"),
    ("KIR", "296", "Kiribati"),
    ("PRK", "408", "Korea, Democratic People's Republic of"),
    ("KOR", "410", "Korea, Republic of"),
    ("KWT", "414", "Kuwait"),
    ("KGZ", "417", "Kyrgyzstan"),
    ("LAO", "418", "Lao People's Democratic Republic"),
    ("LVA", "428", "Latvia"),
    ("LBN", "422", "Lebanon"),
    ("LSO", "426", "Lesotho"),
    ("LBR", "430", "Liberia"),
    ("LBY", "434", "Libya"),
    ("LIE", "438", "Liechtenstein"),
    ("LTU", "440", "Lithuania"),
    ("LUX", "442", "Luxembourg"),
    ("MAC", "446", "Macao"),
    ("MDG", "450", "Madagascar"),
    ("MWI", "454", "Malawi"),
    ("MYS", "458", "Malaysia"),
    ("MDV", "462", "Maldives"),
    ("MLI", "466", "Mali"),
    ("MLT", "470", "Malta"),
    ("MHL", "584", "Marshall Islands"),
    ("MTQ", "474", "Martinique"),
    ("MRT", "478", "Mauritania"),
    ("MUS", "480", "Mauritius"),
    ("MYT", "175", "Mayotte"),
    ("MEX", "484", "Mexico"),
    ("FSM", "583", "Micronesia"),
    ("MDA", "498", "Moldova"),
    ("MCO", "492", "Monaco"),
    ("MNG", "496", "Mongolia"),
    ("MNE", "499", "Montenegro"),
    ("MSR", "500", "Montserrat"),
    ("MAR", "504", "Morocco"),
    ("MOZ", "508", "Mozambique"),
    ("MMR", "104", "Myanmar"),
    ("NAM", "516", "Namibia"),
    ("NRU", "520", "Nauru"),
    ("NPL", "524", "Nepal"),
    ("NLD", "528", "Netherlands"),
    ("NCL", "540", "New Caledonia"),
    ("NZL", "554", "New Zealand"),
    ("NIC", "558", "Nicaragua"),
    ("NER", "562", "Niger"),
    ("NGA", "566", "Nigeria"),
    ("NIU", "570", "Niue"),
    ("NFK", "574", "Norfolk Island"),
    ("MKD", "807", "North Macedonia"),
    ("MNP", "580", "Northern Mariana Islands"),
    ("NOR", "578", "Norway"),
    ("OMN", "512", "Oman"),
    ("PAK", "586", "Pakistan"),
    ("PLW", "585", "Palau"),
    ("PSE", "275", "Palestine, State of"),
    ("PAN", "591", "Panama"),
    ("PNG", "598", "Papua New Guinea"),
    ("PRY", "600", "Paraguay"),
    ("PER", "604", "Peru"),
    ("PHL", "608", "Philippines"),
    ("PCN", "612", "Pitcairn"),
    ("POL", "616", "Poland"),
    ("PRT", "620", "Portugal"),
    ("PRI", "630", "Puerto Rico"),
    ("QAT", "634", "Qatar"),
    ("REU", "638", "Reunion"),
    ("ROU", "642", "Romania"),
    ("RUS", "643", "Russian Federation"),
    ("RWA", "646", "Rwanda"),
    ("BLM", "652", "Saint Barthelemy"),
    ("SHN", "654", "Saint Helena, Ascension and Tristan da Cunha"),
    ("KNA", "659", "Saint Kitts and Nevis"),
    ("LCA", "662", "Saint Lucia"),
    ("MAF", "663", "Saint Martin (French part)"),
    ("SPM", "666", "Saint Pierre and Miquelon"),
    ("VCT", "670", "Saint Vincent and the Grenadines"),
    ("WSM", "882", "Samoa"),
    ("SMR", "674", "San Marino"),
    ("STP", "678", "Sao Tome and Principe"),
    ("SAU", "682", "Saudi Arabia"),
    ("SEN", "686", "Senegal"),
    ("SRB", "688", "Serbia"),
    ("SYC", "690", "Seychelles"),
    ("SLE", "694", "Sierra Leone"),
    ("SGP", "702", "Singapore"),
    ("SXM", "534", "Sint Maarten (Dutch part)"),
    ("SVK", "703", "Slovakia"),
    ("SVN", "705", "Slovenia"),
    ("SLB", "090", "Solomon Islands"),
    ("SOM", "706", "Somalia"),
    ("ZAF", "710", "South Africa"),
    ("SGS", "239", "South Georgia and the South Sandwich Islands"),
    ("SSD", "728", "South Sudan"),
    ("ESP", "724", "Spain"),
    ("LKA", "144", "Sri Lanka"),
    ("SDN", "729", "Sudan"),
    ("SUR", "740", "Suriname"),
    ("SJM", "744", "Svalbard and Jan Mayen"),
    ("SWE", "752", "Sweden"),
    ("CHE", "756", "Switzerland"),
    ("SYR", "760", "Syrian Arab Republic"),
    ("TWN", "158", "Taiwan"),
    ("TJK", "762", "Tajikistan"),
    ("TZA", "834", "Tanzania"),
    ("THA", "764", "Thailand"),
    ("TLS", "626", "Timor-Leste"),
    ("TGO", "768", "Togo"),
    ("TKL", "772", "Tokelau"),
    ("TON", "776", "Tonga"),
    ("TTO", "780", "Trinidad and Tobago"),
    ("TUN", "788", "Tunisia"),
    ("TUR", "792", "Turkiye"),
    ("TKM", "795", "Turkmenistan"),
    ("TCA", "796", "Turks and Caicos Islands"),
    ("TUV", "798", "Tuvalu"),
    ("UGA", "800", "Uganda"),
    ("UKR", "804", "Ukraine"),
    ("ARE", "784", "United Arab Emirates"),
    ("GBR", "826", "United Kingdom"),
    ("USA", "840", "United States of America"),
    ("UMI", "581", "United States Minor Outlying Islands"),
    ("URY", "858", "Uruguay"),
    ("UZB", "860", "Uzbekistan"),
    ("VUT", "548", "Vanuatu"),
    ("VEN", "862", "Venezuela"),
    ("VNM", "704", "Viet Nam"),
    ("VGB", "092", "Virgin Islands (British)"),
    ("VIR", "850", "Virgin Islands (U.S.)"),
    ("WLF", "876", "Wallis and Futuna"),
    ("ESH", "732", "Western Sahara"),
    ("YEM", "887", "Yemen"),
    ("ZMB", "894", "Zambia"),
    ("ZWE", "716", "Zimbabwe"),
];
