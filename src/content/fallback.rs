//! Built-in bilingual copy, used whenever stored content is absent or unusable.

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::collections::HashMap;

use super::{Bundle, Language};

const SECTION_KEYS: &[&str] = &[
    "nav", "hero", "about", "services", "store", "projects", "whyUs", "contact", "footer", "blog",
    "admin",
];

static TRANSLATIONS: Lazy<HashMap<Language, Value>> = Lazy::new(|| {
    HashMap::from([(Language::Ar, arabic()), (Language::En, english())])
});

/// Section keys present in the static table, in page order.
pub fn static_section_keys() -> &'static [&'static str] {
    SECTION_KEYS
}

pub fn static_bundle(section_key: &str, language: Language) -> Option<&'static Bundle> {
    TRANSLATIONS
        .get(&language)
        .and_then(|sections| sections.get(section_key))
        .and_then(Value::as_object)
}

fn sections(entries: Vec<(&str, Value)>) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(key, bundle)| (key.to_string(), bundle))
            .collect(),
    )
}

fn arabic() -> Value {
    sections(vec![
        (
            "nav",
            json!({
                "home": "الرئيسية",
                "about": "من نحن",
                "services": "خدماتنا",
                "store": "المتجر",
                "projects": "أعمالنا",
                "whyUs": "لماذا نحن",
                "blog": "المدونة",
                "contact": "تواصل معنا"
            }),
        ),
        (
            "hero",
            json!({
                "tagline": "كهرباء معمولة صح… من أول مرة",
                "subtitle": "تنفيذ هندسي معتمد | بدون تنازلات | ضمان سنة كاملة",
                "cta": "اطلب معاينة هندسية",
                "ctaSecondary": "تواصل معنا"
            }),
        ),
        (
            "about",
            json!({
                "title": "من نحن",
                "content": "أسس كهربا شركة متخصصة في الأعمال الكهربائية الاحترافية، بخبرة عملية منذ عام 2012 في التأسيس، التشطيب، التيار الخفيف، والأنظمة الذكية.\n\nنحن نؤمن أن الكهرباء علم هندسي وليس اجتهادًا، لذلك نعتمد فقط على حلول مدروسة، خامات معتمدة، وتنفيذ تحت إشراف هندسي مباشر، مع التزام كامل بالكود المصري والمعايير الدولية.\n\nهدفنا هو بناء بنية كهربائية آمنة، مستقرة، وقابلة للاعتماد عليها لسنوات طويلة بدون مشاكل.",
                "experience": "سنوات الخبرة",
                "experienceValue": "+12"
            }),
        ),
        (
            "services",
            json!({
                "title": "خدماتنا",
                "items": [
                    { "title": "تأسيس وتشطيب الأعمال الكهربائية", "description": "تأسيس وتشطيب الأعمال الكهربائية الكاملة للوحدات السكنية والفيلات" },
                    { "title": "لوحات التوزيع", "description": "لوحات توزيع رئيسية وفرعية بأعلى معايير الجودة والأمان" },
                    { "title": "حساب الأحمال والحمايات", "description": "فصل الدوائر وحساب الأحمال والحمايات بدقة هندسية" },
                    { "title": "أنظمة التيار الخفيف", "description": "تأسيس أنظمة التيار الخفيف (إنترنت – كاميرات – إنتركم – أنظمة صوت)" },
                    { "title": "أنظمة Smart Home", "description": "أنظمة السمارت هوم (تأسيس – تركيب – تشغيل)" },
                    { "title": "اختبارات وتقارير", "description": "اختبارات ما قبل التسليم وتقارير فنية كاملة" },
                    { "title": "أنظمة التأريض", "description": "تأسيس وتركيب أنظمة التأريض للحماية من الصواعق والتسريب الكهربائي" }
                ]
            }),
        ),
        (
            "store",
            json!({
                "title": "المتجر",
                "subtitle": "منتجات كهربائية معتمدة وأدوات احترافية",
                "description": "اكتشف مجموعتنا من المنتجات الكهربائية المعتمدة والأدوات الاحترافية لجميع احتياجاتك الكهربائية",
                "viewAll": "عرض جميع المنتجات",
                "categories": [
                    { "title": "أدوات كهربائية", "description": "أدوات احترافية للعمل الكهربائي" },
                    { "title": "قطع غيار", "description": "قطع غيار معتمدة ومطابقة للمواصفات" },
                    { "title": "أجهزة أمان", "description": "أجهزة الحماية والأمان الكهربائي" },
                    { "title": "إضاءة", "description": "أنظمة إضاءة حديثة وفعالة" }
                ]
            }),
        ),
        (
            "projects",
            json!({
                "title": "أعمالنا",
                "description": "نفذنا أعمال كهرباء متنوعة لوحدات سكنية، فيلات، بدرومات، ومشروعات خاصة، مع اختلاف متطلبات كل مشروع، ولكن بثابت واحد: تنفيذ هندسي سليم بدون تنازل عن الجودة أو الأمان.",
                "viewAll": "عرض جميع الأعمال"
            }),
        ),
        (
            "whyUs",
            json!({
                "title": "لماذا أسس كهربا؟",
                "items": [
                    "تنفيذ هندسي وليس عمالة عشوائية",
                    "خامات معتمدة ومطابقة للمواصفات",
                    "فصل كامل للمسارات والدوائر",
                    "شفافية كاملة في كل مرحلة",
                    "إشراف هندسي مباشر",
                    "ضمان سنة كاملة على جميع الأعمال"
                ]
            }),
        ),
        (
            "contact",
            json!({
                "title": "تواصل معنا",
                "description": "نحن جاهزون لمناقشة مشروعك وتقديم الحل الهندسي الأنسب له.",
                "location": "19 محمد شفيق",
                "phone": "01004111999",
                "email": "info@aseskahraba.com",
                "cta": "احجز معاينة"
            }),
        ),
        (
            "footer",
            json!({
                "rights": "جميع الحقوق محفوظة",
                "company": "أسس كهربا"
            }),
        ),
        (
            "blog",
            json!({
                "title": "المدونة",
                "subtitle": "مقالات ونصائح في مجال الكهرباء",
                "readMore": "اقرأ المزيد",
                "backToHome": "العودة للرئيسية",
                "backToBlog": "العودة للمدونة",
                "viewAll": "عرض جميع المقالات",
                "publishedOn": "نُشر في",
                "noArticles": "لا توجد مقالات حالياً"
            }),
        ),
        (
            "admin",
            json!({
                "title": "لوحة إدارة المدونة",
                "addNew": "إضافة مقال جديد",
                "editPost": "تعديل المقال",
                "deletePost": "حذف المقال",
                "confirmDelete": "هل أنت متأكد من حذف هذا المقال؟",
                "titleAr": "العنوان بالعربية",
                "titleEn": "العنوان بالإنجليزية",
                "contentAr": "المحتوى بالعربية",
                "contentEn": "المحتوى بالإنجليزية",
                "excerptAr": "المقتطف بالعربية",
                "excerptEn": "المقتطف بالإنجليزية",
                "slug": "الرابط (slug)",
                "imageUrl": "رابط الصورة",
                "published": "منشور",
                "save": "حفظ",
                "cancel": "إلغاء",
                "success": "تم الحفظ بنجاح",
                "error": "حدث خطأ"
            }),
        ),
    ])
}

fn english() -> Value {
    sections(vec![
        (
            "nav",
            json!({
                "home": "Home",
                "about": "About Us",
                "services": "Services",
                "store": "Store",
                "projects": "Projects",
                "whyUs": "Why Us",
                "blog": "Blog",
                "contact": "Contact"
            }),
        ),
        (
            "hero",
            json!({
                "tagline": "Electrical Work Done Right — From Day One",
                "subtitle": "Certified Engineering | No Compromises | 1-Year Warranty",
                "cta": "Request Engineering Visit",
                "ctaSecondary": "Contact Us"
            }),
        ),
        (
            "about",
            json!({
                "title": "About Us",
                "content": "Ases Kahraba is a professional electrical services company with hands-on experience since 2012 in electrical infrastructure, low current systems, and smart home solutions.\n\nWe believe electrical work is an engineering discipline—not guesswork. Every project is designed and executed using certified materials, proper calculations, and direct engineering supervision, fully compliant with local and international standards.\n\nOur mission is to deliver safe, reliable, and future-ready electrical systems.",
                "experience": "Years of Experience",
                "experienceValue": "12+"
            }),
        ),
        (
            "services",
            json!({
                "title": "Our Services",
                "items": [
                    { "title": "Electrical Infrastructure & Finishing", "description": "Full electrical infrastructure and finishing works for residential units and villas" },
                    { "title": "Distribution Boards", "description": "Main and sub distribution boards with the highest quality and safety standards" },
                    { "title": "Load Calculation & Protection", "description": "Load calculation and protection systems with engineering precision" },
                    { "title": "Low Current Systems", "description": "Low current systems (LAN, CCTV, Intercom, Audio systems)" },
                    { "title": "Smart Home Systems", "description": "Smart home systems (infrastructure, installation, commissioning)" },
                    { "title": "Testing & Reports", "description": "Testing, commissioning, and detailed technical handover reports" },
                    { "title": "Earthing Systems", "description": "Installation of earthing and grounding systems for lightning and electrical leakage protection" }
                ]
            }),
        ),
        (
            "store",
            json!({
                "title": "Store",
                "subtitle": "Certified Electrical Products & Professional Tools",
                "description": "Discover our collection of certified electrical products and professional tools for all your electrical needs",
                "viewAll": "View All Products",
                "categories": [
                    { "title": "Electrical Tools", "description": "Professional tools for electrical work" },
                    { "title": "Spare Parts", "description": "Certified spare parts meeting specifications" },
                    { "title": "Safety Equipment", "description": "Electrical protection and safety devices" },
                    { "title": "Lighting", "description": "Modern and efficient lighting systems" }
                ]
            }),
        ),
        (
            "projects",
            json!({
                "title": "Our Projects",
                "description": "We have delivered electrical works for residential units, villas, basements, and private projects—each with unique requirements, yet all executed with the same engineering precision and quality standards.",
                "viewAll": "View All Projects"
            }),
        ),
        (
            "whyUs",
            json!({
                "title": "Why Ases Kahraba?",
                "items": [
                    "Engineering-based execution",
                    "Certified materials & standards compliance",
                    "Proper circuit and path separation",
                    "Full transparency",
                    "Direct engineering supervision",
                    "1-year warranty on all installations"
                ]
            }),
        ),
        (
            "contact",
            json!({
                "title": "Contact Us",
                "description": "Let's discuss your project and provide the right engineering solution.",
                "location": "19 Mohammed Shafeek",
                "phone": "+20 100 411 1999",
                "email": "info@aseskahraba.com",
                "cta": "Book a Visit"
            }),
        ),
        (
            "footer",
            json!({
                "rights": "All Rights Reserved",
                "company": "Ases Kahraba"
            }),
        ),
        (
            "blog",
            json!({
                "title": "Blog",
                "subtitle": "Articles and tips about electrical work",
                "readMore": "Read More",
                "backToHome": "Back to Home",
                "backToBlog": "Back to Blog",
                "viewAll": "View All Articles",
                "publishedOn": "Published on",
                "noArticles": "No articles available"
            }),
        ),
        (
            "admin",
            json!({
                "title": "Blog Admin Panel",
                "addNew": "Add New Article",
                "editPost": "Edit Article",
                "deletePost": "Delete Article",
                "confirmDelete": "Are you sure you want to delete this article?",
                "titleAr": "Title (Arabic)",
                "titleEn": "Title (English)",
                "contentAr": "Content (Arabic)",
                "contentEn": "Content (English)",
                "excerptAr": "Excerpt (Arabic)",
                "excerptEn": "Excerpt (English)",
                "slug": "URL Slug",
                "imageUrl": "Image URL",
                "published": "Published",
                "save": "Save",
                "cancel": "Cancel",
                "success": "Saved successfully",
                "error": "An error occurred"
            }),
        ),
    ])
}
