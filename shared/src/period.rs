//! The five selectable map periods and their static descriptors.

use serde::{Deserialize, Serialize};

/// One of the historical/administrative periods the map can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    DutchSpanish,
    Ming,
    Qing,
    Japanese,
    Modern,
}

/// Which geometry files and lookup tables a period renders from. Resolved
/// once from the period instead of feature-detecting optional tables at
/// render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometrySources {
    /// Modern county boundaries, colored by a per-period lookup
    /// (Dutch/Spanish control mapping or modern classification).
    Counties,
    /// County base layer underneath the 1894 Qing administrative regions.
    QingLayered,
    /// County base layer, then Ming boundary regions, then settlements.
    MingLayered,
    /// The 1926 prefecture file, decoded via sole-object fallback.
    JapaneseSingle,
}

/// One geometry asset to fetch and decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFile {
    pub url: &'static str,
    /// Named topology object to decode; `None` uses the sole-object fallback.
    pub object: Option<&'static str>,
}

pub const COUNTIES_FILE: SourceFile = SourceFile {
    url: "/data/counties.json",
    object: Some("map"),
};
pub const QING_FILE: SourceFile = SourceFile {
    url: "/data/qing_1894.json",
    object: Some("qing_1894"),
};
pub const MING_BOUNDARY_FILE: SourceFile = SourceFile {
    url: "/data/ming_boundary.json",
    object: Some("ming_boundary"),
};
pub const MING_SETTLEMENT_FILE: SourceFile = SourceFile {
    url: "/data/ming_settlement.json",
    object: Some("ming_settlement"),
};
pub const JAPANESE_FILE: SourceFile = SourceFile {
    url: "/data/japanese_1926.json",
    object: None,
};

impl GeometrySources {
    /// Files in fetch order. Layer order follows this order where a period
    /// stacks several files.
    pub const fn files(self) -> &'static [SourceFile] {
        match self {
            GeometrySources::Counties => &[COUNTIES_FILE],
            GeometrySources::QingLayered => &[COUNTIES_FILE, QING_FILE],
            GeometrySources::MingLayered => {
                &[COUNTIES_FILE, MING_BOUNDARY_FILE, MING_SETTLEMENT_FILE]
            }
            GeometrySources::JapaneseSingle => &[JAPANESE_FILE],
        }
    }
}

/// A detailed historical map image shown in a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailedMap {
    pub image: &'static str,
    pub credits: &'static str,
}

/// Static per-period configuration: UI text, curated source excerpts, and
/// the keyword list that filters them down to governance-related passages.
#[derive(Debug, Clone, Copy)]
pub struct PeriodInfo {
    pub title: &'static str,
    pub years: &'static str,
    pub intro: &'static [&'static str],
    pub historical_text: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub source_title: &'static str,
    pub detailed_map: Option<DetailedMap>,
}

impl Period {
    /// Selector order, also the order of the period buttons.
    pub const ALL: [Period; 5] = [
        Period::DutchSpanish,
        Period::Ming,
        Period::Qing,
        Period::Japanese,
        Period::Modern,
    ];

    /// The period shown on first load.
    pub const DEFAULT: Period = Period::DutchSpanish;

    /// Stable key used in button data attributes and persisted settings.
    pub const fn key(self) -> &'static str {
        match self {
            Period::DutchSpanish => "dutch_spanish",
            Period::Ming => "ming",
            Period::Qing => "qing",
            Period::Japanese => "japanese",
            Period::Modern => "modern",
        }
    }

    pub fn from_key(key: &str) -> Option<Period> {
        Period::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn display_name(self) -> &'static str {
        self.info().title
    }

    pub fn years(self) -> &'static str {
        self.info().years
    }

    pub const fn sources(self) -> GeometrySources {
        match self {
            Period::DutchSpanish | Period::Modern => GeometrySources::Counties,
            Period::Qing => GeometrySources::QingLayered,
            Period::Ming => GeometrySources::MingLayered,
            Period::Japanese => GeometrySources::JapaneseSingle,
        }
    }

    pub fn info(self) -> &'static PeriodInfo {
        match self {
            Period::DutchSpanish => &DUTCH_SPANISH_INFO,
            Period::Ming => &MING_INFO,
            Period::Qing => &QING_INFO,
            Period::Japanese => &JAPANESE_INFO,
            Period::Modern => &MODERN_INFO,
        }
    }
}

const SOURCE_TITLE: &str = "《台灣歷史圖說 史前至一九四五年》";

static DUTCH_SPANISH_INFO: PeriodInfo = PeriodInfo {
    title: "荷西时期",
    years: "1624 - 1662",
    intro: &[
        "1624年，荷兰东印度公司占领大员（今台南安平），修筑热兰遮城，后又在赤崁建普罗文西亚城，以此为据点经营南台湾的贸易与垦殖。",
        "1626年，西班牙人自马尼拉北上，先后占领鸡笼（今基隆）与淡水，修筑圣萨尔瓦多城，控制北部海岸。1642年荷兰北上逐出西班牙势力，台湾西部平原大体纳入荷兰统治。",
        "澎湖在此期间仍由明朝驻军控制，与两国在台势力互不统属。",
    ],
    historical_text: &[
        "荷蘭人據台以大員為中心，設台灣長官統轄商務與政務，凡土地、貿易、稅課皆由東印度公司議定。",
        "荷蘭人向原住民番社徵收貢賦，並召集各社長老舉行地方會議，頒給藤杖以示管轄，其行政區劃大抵以南部諸社為核心。",
        "西班牙長官駐雞籠，轄淡水諸地，傳教士深入噶瑪蘭一帶傳教，然其經營重心始終在北部港灣。",
        "當時漢人移民漸多，東印度公司編定戶口，課徵人頭稅，南部平原之墾殖自此漸盛。",
        "一六四二年荷人北征，西班牙守軍降，北部諸地遂併入荷蘭台灣長官轄下。",
    ],
    keywords: &[
        "荷蘭", "西班牙", "統治", "管轄", "控制", "長官", "行政", "區劃", "熱蘭遮",
        "普羅文西", "大員", "東印度公司", "原住民", "番社", "戶口",
    ],
    source_title: SOURCE_TITLE,
    detailed_map: None,
};

static MING_INFO: PeriodInfo = PeriodInfo {
    title: "明郑时期",
    years: "1662 - 1683",
    intro: &[
        "1662年，郑成功围攻热兰遮城迫使荷兰人投降，在台湾建立明郑政权，设承天府于赤崁，并以天兴、万年二县分治南北。",
        "郑经继位后改县为州，推行屯垦，军队就地开垦形成众多屯垦据点；设里的疆界大体沿西部平原展开，山地与东部仍在控制之外。",
    ],
    historical_text: &[
        "鄭成功既逐荷人，改赤崁為東都明京，設承天府，置天興、萬年二縣，是為漢人政權在台建制之始。",
        "鄭經嗣立，改東都為東寧，升二縣為州，分設安撫司於南北路及澎湖，行政之制漸備。",
        "明鄭行寓兵於農之策，諸鎮分地屯墾，軍隊所至，阡陌漸闢，今日南部若干地名猶存當年營鎮之號。",
        "其設里疆界大抵不出西部平原，山地番社仍自為治，政權之力未嘗及於東部。",
        "永曆三十七年，鄭克塽降清，明鄭三世而終，台灣遂入清朝版圖。",
    ],
    keywords: &[
        "鄭成功", "鄭經", "鄭克塽", "明鄭", "政權", "建制", "承天府", "安平鎮",
        "天興州", "萬年州", "行政", "疆界", "屯墾", "設里", "軍隊",
    ],
    source_title: SOURCE_TITLE,
    detailed_map: None,
};

static QING_INFO: PeriodInfo = PeriodInfo {
    title: "清治时期",
    years: "1683 - 1895",
    intro: &[
        "1684年清朝将台湾纳入福建省，设一府三县；此后两百年间行政建置随拓垦不断扩张。",
        "1885年台湾建省，刘铭传出任首任巡抚，推行清赋、抚番与近代化建设。至1894年（光绪二十年），全台分为台北、台湾、台南三府与台东直隶州，共十一县三厅。",
        "中央山地未正式设治，地图上以灰色表示。",
    ],
    historical_text: &[
        "康熙二十三年，清廷設台灣府，隸福建省，下轄台灣、鳳山、諸羅三縣，此清代治台行政區劃之肇端。",
        "雍正、嘉慶間，先後增設彰化縣、淡水廳、噶瑪蘭廳，拓墾所及，建置隨之。",
        "同治十三年牡丹社事件後，清政府改採積極經營之策，沈葆楨奏請開山撫番，廢內山番界之禁，土牛紅線自此名存實亡。",
        "光緒十一年台灣建省，劉銘傳為首任巡撫，清丈田賦，設撫墾局，興鐵路電報，台灣為當時全國最新式之行省。",
        "光緒二十年，全台行政區劃為三府一直隸州，統十一縣三廳，台北府轄宜蘭、淡水、新竹諸縣，台灣府治於台中，台南府轄南路，台東直隸州轄後山。",
    ],
    keywords: &[
        "清朝", "清政府", "清廷", "統治", "行政", "區劃", "府", "縣", "廳", "直隸州",
        "劉銘傳", "巡撫", "台灣省", "三府", "開山撫番", "番界", "土牛紅線",
    ],
    source_title: SOURCE_TITLE,
    detailed_map: Some(DetailedMap {
        image: "/maps/qing_1894_detail.jpg",
        credits: "底图：《臺灣地輿全圖》（1894年），中央研究院臺灣史研究所档案馆藏",
    }),
};

static JAPANESE_INFO: PeriodInfo = PeriodInfo {
    title: "日据时期",
    years: "1895 - 1945",
    intro: &[
        "1895年马关条约后，日本据有台湾，设台湾总督府，樺山资纪为首任总督。",
        "历经多次改制，1920年确立州厅体制；地图所示为1926年的五州三厅：台北、新竹、台中、台南、高雄五州，及台东、花莲港、澎湖三厅。",
    ],
    historical_text: &[
        "明治二十八年，日本領有台灣，置台灣總督府，樺山資紀為首任總督，六月十七日行始政式於台北。",
        "總督初期集軍政大權於一身，以武力鎮壓各地抗日勢力，統治之基礎至兒玉、後藤時代始告穩固。",
        "大正九年，田健治郎改地方制度為五州二廳，州下設郡市，廳下設支廳，台灣地方行政區劃自此定型。",
        "大正十五年澎湖獨立設廳，遂成五州三廳之制，直至昭和二十年日本戰敗為止。",
        "總督府以警察制度輔助行政，保甲連坐，理蕃政策及於山地，其治理之嚴密為清代所未有。",
    ],
    keywords: &[
        "日本", "總督", "統治", "殖民", "行政", "區劃", "州", "廳", "五州三廳",
        "樺山資紀", "始政", "治理", "政策",
    ],
    source_title: SOURCE_TITLE,
    detailed_map: None,
};

static MODERN_INFO: PeriodInfo = PeriodInfo {
    title: "现代",
    years: "1945 - 至今",
    intro: &[
        "1945年后台湾行政区划几经调整，现行建置为6个直辖市、3个市与13个县。",
        "地图按行政层级着色：蓝色为直辖市，蓝绿色为市，浅绿色为县。",
    ],
    historical_text: &[],
    keywords: &[],
    source_title: SOURCE_TITLE,
    detailed_map: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for period in Period::ALL {
            assert_eq!(Period::from_key(period.key()), Some(period));
        }
        assert_eq!(Period::from_key("edo"), None);
    }

    #[test]
    fn sources_match_period_layering() {
        assert_eq!(Period::DutchSpanish.sources().files(), &[COUNTIES_FILE]);
        assert_eq!(Period::Modern.sources().files(), &[COUNTIES_FILE]);
        assert_eq!(
            Period::Qing.sources().files(),
            &[COUNTIES_FILE, QING_FILE]
        );
        assert_eq!(
            Period::Ming.sources().files(),
            &[COUNTIES_FILE, MING_BOUNDARY_FILE, MING_SETTLEMENT_FILE]
        );
        assert_eq!(Period::Japanese.sources().files(), &[JAPANESE_FILE]);
    }

    #[test]
    fn japanese_file_uses_sole_object_fallback() {
        assert_eq!(JAPANESE_FILE.object, None);
    }

    #[test]
    fn every_period_with_historical_text_has_keywords() {
        for period in Period::ALL {
            let info = period.info();
            if !info.historical_text.is_empty() {
                assert!(
                    !info.keywords.is_empty(),
                    "{} has excerpts but no filter keywords",
                    period.key()
                );
            }
        }
    }
}
