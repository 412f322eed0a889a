/// Builds the single instruction sent for one activity.
pub fn build_prompt(subject: &str, semester: &str, topic: &str) -> String {
    format!(
        r#"قم بإنشاء خطة نشاط صفي تفاعلي متكامل للصف العاشر الأكاديمي حسب المنهاج الفلسطيني.
المبحث: {subject}
الفصل الدراسي: {semester}
عنوان الدرس/الموضوع: {topic}

يجب أن يكون التركيز على "التعلم باللعب" و"التفاعل الرقمي والنشط".
يجب أن تتضمن الاستجابة:
1. هدف تعليمي واضح ومحدد.
2. الأدوات والوسائل التعليمية اللازمة.
3. خطوات تنفيذ النشاط الصفي.
4. أنشطة تفاعلية متنوعة (عملية، مجموعات، إلكترونية).
5. لعبة تنافسية محددة (مثل: مسابقات كاهوت، العب وتعلم، سباق المعلومات).
6. قسم موسع للأنشطة الإلكترونية يشمل:
   - اقتراحات لألعاب مصغرة تفاعلية (Mini-games) مثل فكرة للعبة على Wordwall أو Kahoot أو Quizizz.
   - توضيح لنوع الأداة (لعبة، محاكاة، اختبار، أداة عرض).
   - شرح لكيفية ربط كل أداة رقمية بهدف النشاط.
7. خاتمة واستنتاج.

{NO_URL_NOTE}"#
    )
}

pub const NO_URL_NOTE: &str =
    "ملاحظة: لا تقم بتضمين روابط URL فعلية، فقط قم بوصف النشاط الرقمي المقترح وكيفية تنفيذه.";
